use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use energy_savings_toolbox::i18n::{self, Translator};
use energy_savings_toolbox::tool::{self, ToolName};
use energy_savings_toolbox::{app, config};

/// 에너지 절감 계산기 (대화형 메뉴 또는 JSON 일괄 계산)
#[derive(Parser, Debug)]
#[command(name = "energy_savings_toolbox", version)]
struct Args {
    /// 언어 (nl, en, auto)
    #[arg(long, default_value = "auto")]
    lang: String,

    /// 언어팩 디렉터리 (<code>.toml)
    #[arg(long)]
    locales: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// JSON 입력 파일로 계산하고 결과 JSON을 출력한다. `-`는 표준 입력.
    Calc {
        /// 계산기 슬러그 (zonnepanelen, warmtepomp, ...)
        tool: ToolName,
        input: PathBuf,
        /// 들여쓰기 출력
        #[arg(long)]
        pretty: bool,
    },
    /// 사용 가능한 계산기 목록
    Tools,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match try_run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fout: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        Some(Command::Calc {
            tool,
            input,
            pretty,
        }) => calc(tool, &input, pretty),
        Some(Command::Tools) => {
            let cfg_lang = config::load_if_present(Path::new(config::CONFIG_FILE))
                .ok()
                .flatten()
                .and_then(|cfg| cfg.language);
            let lang = i18n::resolve_language(&args.lang, cfg_lang.as_deref());
            let tr = Translator::new_with_pack(&lang, args.locales.as_deref());
            for tool in ToolName::ALL {
                println!("{:<16} {}", tool.slug(), tr.t(&tool.i18n_key()));
            }
            Ok(())
        }
        None => {
            let mut cfg = config::load_or_default()?;
            let lang = i18n::resolve_language(&args.lang, cfg.language.as_deref());
            let tr = Translator::new_with_pack(&lang, args.locales.as_deref());
            app::run(&mut cfg, &tr)?;
            Ok(())
        }
    }
}

fn calc(tool: ToolName, input: &Path, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)?
    };
    let value: Value = serde_json::from_str(&raw)?;
    let result = tool::run_calculation(tool, value)?;
    let rendered = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{rendered}");
    Ok(())
}
