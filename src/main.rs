//! deflist CLI - render wiki definition lists

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;

use deflist::{Error, Format, Options};

#[derive(Parser)]
#[command(name = "deflist")]
#[command(version, about = "Render wiki definition lists", long_about = None)]
#[command(after_help = "EXAMPLES:
    deflist page.txt                    Render to XHTML
    deflist --format odt page.txt       Render ODF content.xml
    deflist --set classname=glossary -  Read stdin, custom dl class")]
struct Cli {
    /// Input file, or - for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    input: String,

    /// Output format: xhtml, odt, or anything else for plain text
    #[arg(short, long, default_value = "xhtml")]
    format: String,

    /// Set an option (dt_fancy, classname)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    settings: Vec<String>,

    /// Do not wrap terms in <span class="term">
    #[arg(long)]
    plain_terms: bool,

    /// Class for dl elements without a ~~dlist:name~~ override
    #[arg(long, value_name = "NAME")]
    class: Option<String>,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> deflist::Result<()> {
    let options = options_from(cli)?;
    let format = Format::from_name(&cli.format);
    log::debug!("rendering {} as {format:?}", cli.input);

    let input = read_input(&cli.input)?;
    let output = deflist::render(&input, format, &options);

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn options_from(cli: &Cli) -> deflist::Result<Options> {
    let mut options = Options::default();
    for setting in &cli.settings {
        let (key, value) = setting
            .split_once('=')
            .ok_or_else(|| Error::Usage(format!("expected KEY=VALUE, got {setting:?}")))?;
        options.set(key, value)?;
    }
    if cli.plain_terms {
        options.dt_fancy = false;
    }
    if let Some(class) = &cli.class {
        options.class_name = class.trim().to_string();
    }
    Ok(options)
}

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}
