use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chatmarkup::{Config, Error, Formatter};
use clap::{Parser, ValueEnum};
use tracing::info;

#[derive(Parser)]
#[command(name = "chatmarkup")]
#[command(about = "Render chat message markup as styled text, Typst or PDF")]
struct Cli {
    /// Input message file, or `-` for stdin
    input: Option<PathBuf>,

    /// Output file (stdout when omitted, except for PDF)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file
    #[arg(short, long, default_value = "chatmarkup.toml")]
    config: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Typst,
    Pdf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli, io::stdin(), &mut io::stdout()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Run one conversion. `stdin` is read when no input file is given; `stdout`
/// receives the output when no output file is given.
fn run(cli: &Cli, stdin: impl Read, stdout: &mut impl Write) -> Result<(), Error> {
    let config = Config::load(&cli.config)?;
    let input_file = cli.input.as_deref().filter(|path| *path != Path::new("-"));

    let message = match input_file {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(stdin)?,
    };

    let bytes = match cli.format {
        OutputFormat::Text => Formatter::from_config(&config)
            .format(Some(&message))
            .to_plain_text()
            .into_bytes(),
        OutputFormat::Json => {
            let text = Formatter::from_config(&config).format(Some(&message));
            let mut json = serde_json::to_string_pretty(&text)?;
            json.push('\n');
            json.into_bytes()
        }
        OutputFormat::Typst => chatmarkup::message_to_typst(Some(&message), &config).into_bytes(),
        OutputFormat::Pdf => {
            let output = match (&cli.output, input_file) {
                (Some(output), _) => output.clone(),
                (None, Some(input)) => input.with_extension("pdf"),
                (None, None) => return Err(Error::MissingOutput),
            };
            let pdf = chatmarkup::message_to_pdf(Some(&message), &config)?;
            fs::write(&output, pdf)?;
            writeln!(stdout, "Created {}", output.display())?;
            return Ok(());
        }
    };

    match &cli.output {
        Some(output) => {
            fs::write(output, bytes)?;
            info!(path = %output.display(), "wrote output");
        }
        None => stdout.write_all(&bytes)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Parse CLI args with the config pointed at a file that does not exist.
    fn cli(dir: &TempDir, args: &[&str]) -> Cli {
        let config = dir.path().join("absent.toml");
        let mut argv = vec!["chatmarkup", "-c", config.to_str().unwrap()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn run_to_string(cli: &Cli, stdin: &str) -> String {
        let mut stdout = Vec::new();
        run(cli, stdin.as_bytes(), &mut stdout).unwrap();
        String::from_utf8(stdout).unwrap()
    }

    #[test]
    fn reads_stdin_when_input_is_dash() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli(&dir, &["-"]);
        assert_eq!(
            run_to_string(&cli, "<ul><li>a</li><li>b</li></ul>"),
            "• a\n• b\n"
        );
    }

    #[test]
    fn reads_stdin_when_input_is_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli(&dir, &[]);
        assert_eq!(run_to_string(&cli, "  <b>hi</b> "), "hi");
    }

    #[test]
    fn reads_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("message.txt");
        fs::write(&input, "<ol><li>x</li></ol>").unwrap();
        let cli = cli(&dir, &[input.to_str().unwrap()]);
        assert_eq!(run_to_string(&cli, "ignored"), "1. x\n");
    }

    #[test]
    fn json_output() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli(&dir, &["-f", "json"]);
        let out = run_to_string(&cli, "<b><u>x</u></b>");
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "runs",
                "value": [{
                    "content": "x",
                    "style": {
                        "bold": true,
                        "italic": false,
                        "underline": true,
                        "strikethrough": false
                    }
                }]
            })
        );
    }

    #[test]
    fn typst_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.typ");
        let cli = cli(&dir, &["-f", "typst", "-o", output.to_str().unwrap()]);
        assert_eq!(run_to_string(&cli, "<i>x</i>"), "");
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.ends_with("#emph[x];\n"));
    }

    #[test]
    fn config_file_changes_markers() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("chatmarkup.toml");
        fs::write(&config, "[list]\nbullet = \"- \"\n").unwrap();
        let cli = Cli::try_parse_from(["chatmarkup", "-c", config.to_str().unwrap()]).unwrap();
        assert_eq!(run_to_string(&cli, "<ul><li>a</li></ul>"), "- a\n");
    }

    #[test]
    fn pdf_from_stdin_needs_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let cli = cli(&dir, &["-f", "pdf"]);
        let mut stdout = Vec::new();
        let result = run(&cli, "x".as_bytes(), &mut stdout);
        assert!(matches!(result, Err(Error::MissingOutput)));
        assert!(stdout.is_empty());
    }

    #[test]
    fn pdf_defaults_to_input_with_pdf_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("message.txt");
        fs::write(&input, "<b>hello</b>").unwrap();
        let cli = cli(&dir, &["-f", "pdf", input.to_str().unwrap()]);

        let out = run_to_string(&cli, "");
        let expected = dir.path().join("message.pdf");
        assert_eq!(out, format!("Created {}\n", expected.display()));
        assert!(fs::read(&expected).unwrap().starts_with(b"%PDF"));
    }
}
