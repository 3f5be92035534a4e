//! ansible-specdoc CLI
//!
//! Generates documentation for a single Ansible module from its spec, or
//! injects the generated docs into the module's documentation fields.
//!
//! Usage:
//!   ansible-specdoc -i plugins/modules/instance.py -f yaml
//!   ansible-specdoc -i plugins/modules/instance.py -f template -t docs/module.md.hbs -o docs/instance.md
//!   ansible-specdoc -i plugins/modules/instance.py --inject
//!   ansible-specdoc -i plugins/modules/instance.py --check

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use ansible_specdoc::{
    check_injected, inject_docs, AssignmentEditor, InjectedDocs, MetaLinter, OutputFormat,
    SpecDocConfig, SpecDocModule,
};

#[derive(Parser)]
#[command(name = "ansible-specdoc")]
#[command(about = "Generate Ansible Module documentation from spec.")]
#[command(version)]
struct Cli {
    /// Read the module from stdin
    #[arg(short, long)]
    stdin: bool,

    /// The name of the module (required for stdin)
    #[arg(short = 'n', long, alias = "module_name")]
    module_name: Option<String>,

    /// The module to generate documentation from
    #[arg(short, long, alias = "input_file")]
    input_file: Option<PathBuf>,

    /// The file to output the documentation to
    #[arg(short, long, alias = "output_file")]
    output_file: Option<PathBuf>,

    /// The output format of the documentation (yaml, json, template)
    #[arg(short = 'f', long, alias = "output_format")]
    output_format: Option<String>,

    /// Inject the output documentation into the DOCUMENTATION, RETURN, and EXAMPLES fields of the input module
    #[arg(short = 'j', long)]
    inject: bool,

    /// The file to use as the template for templated formats
    #[arg(short, long, alias = "template_file")]
    template_file: Option<PathBuf>,

    /// Clear the DOCUMENTATION, RETURN, and EXAMPLES fields of the input module
    #[arg(short, long, alias = "clear_injected_fields")]
    clear_injected_fields: bool,

    /// Fail if the injected documentation of the input module is out of date
    #[arg(long)]
    check: bool,

    /// Config file to load
    #[arg(long)]
    config: Option<String>,

    /// Write the effective configuration to this path and exit
    #[arg(long, alias = "write_config")]
    write_config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SpecDocConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;

    if let Some(path) = &cli.write_config {
        config
            .save(path)
            .with_context(|| format!("failed to write configuration to {}", path))?;
        return Ok(());
    }

    let editing = cli.inject || cli.clear_injected_fields || cli.check;
    if editing && cli.output_format.is_some() {
        bail!("No format should be declared when using --inject, --clear-injected-fields or --check.");
    }
    if editing && cli.input_file.is_none() {
        bail!("An input file must be specified when using --inject, --clear-injected-fields or --check.");
    }

    let module = load_module(&cli, &config)?;

    if config.lint.enabled {
        let result = MetaLinter::new().lint(module.name(), module.meta());
        for warning in &result.warnings {
            warn!(module = %result.module, code = warning.code, path = %warning.path, "{}", warning.message);
        }
    }

    let editor = AssignmentEditor::new();

    if cli.check {
        let docs = module.generate_ansible_doc_yaml()?;
        let drift = check_injected(module.source(), &docs, &editor, &config.inject)?;
        if drift.is_empty() {
            eprintln!("✅ {} - injected documentation is up to date", module.name());
            return Ok(());
        }

        for field in &drift {
            println!("{}", field.diff);
        }
        eprintln!(
            "❌ {} - {} field(s) out of date, run with --inject",
            module.name(),
            drift.len()
        );
        std::process::exit(1);
    }

    if cli.inject || cli.clear_injected_fields {
        let docs = if cli.clear_injected_fields {
            InjectedDocs::cleared()
        } else {
            module.generate_ansible_doc_yaml()?
        };

        let injected = inject_docs(module.source(), &docs, &editor, &config.inject)?;
        if let Some(path) = &cli.input_file {
            fs::write(path, injected)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        return Ok(());
    }

    let format = match &cli.output_format {
        Some(format) => format.parse::<OutputFormat>()?,
        None => config.output.format,
    };

    let template = match format {
        OutputFormat::Template => {
            match cli.template_file.as_ref().or(config.output.template.as_ref()) {
                Some(path) => Some(
                    fs::read_to_string(path)
                        .with_context(|| format!("failed to read template {}", path.display()))?,
                ),
                None => None,
            }
        }
        _ => None,
    };

    let output = module.generate(format, template.as_deref())?;
    write_output(cli.output_file.as_ref(), &output)
}

fn load_module(cli: &Cli, config: &SpecDocConfig) -> anyhow::Result<SpecDocModule> {
    let editor = AssignmentEditor::new();

    if cli.stdin {
        let Some(name) = cli.module_name.as_deref() else {
            bail!("Module name must be specified for stdin input");
        };
        let content = io::read_to_string(io::stdin()).context("failed to read module from stdin")?;
        return Ok(SpecDocModule::load_str_with(
            &content,
            name,
            &config.load.meta_name,
            &editor,
        )?);
    }

    match &cli.input_file {
        Some(path) => Ok(SpecDocModule::load_file_with(
            path,
            cli.module_name.as_deref(),
            &config.load.meta_name,
            &editor,
        )?),
        None => bail!("No input source specified"),
    }
}

fn write_output(output_file: Option<&PathBuf>, output: &str) -> anyhow::Result<()> {
    match output_file {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
