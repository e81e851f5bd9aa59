use std::io::Write;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Read from and write to socket-gateway resources", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:80")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read once from a resource
    Read {
        resource: String,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write data to a resource
    Write {
        resource: String,
        data: String,
        /// Send DATA as base64 text to write/base64.txt
        #[arg(long)]
        base64: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    ByteBin,
    ByteTxt,
    Bytes,
    Base64,
    Array,
    Text,
}

impl Format {
    fn suffix(self) -> &'static str {
        match self {
            Format::ByteBin => "read/byte.bin",
            Format::ByteTxt => "read/byte.txt",
            Format::Bytes => "read/bytes.bin",
            Format::Base64 => "read/base64.txt",
            Format::Array => "read/array.json",
            Format::Text => "read/text.json",
        }
    }
}

fn endpoint(base: &str, resource: &str, suffix: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        resource.trim_matches('/'),
        suffix
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Read { resource, format } => {
            client
                .get(endpoint(&cli.url, &resource, format.suffix()))
                .send()
                .await?
        }
        Commands::Write {
            resource,
            data,
            base64,
        } => {
            let suffix = if base64 {
                "write/base64.txt"
            } else {
                "write/bytes.bin"
            };
            client
                .post(endpoint(&cli.url, &resource, suffix))
                .body(data)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body = res.bytes().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if !body.is_empty() {
            eprintln!("{}", String::from_utf8_lossy(&body));
        }
        std::process::exit(1);
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&body)?;
    if !body.ends_with(b"\n") && std::str::from_utf8(&body).is_ok() {
        writeln!(stdout)?;
    }
    Ok(())
}
