//! watson-cli: translate, identify and synthesize from the command line.
//!
//! Usage:
//!   watson-cli translate <source> <target> <text>   Translate text between a language pair
//!   watson-cli identify <text>                      Identify the language of text
//!   watson-cli languages                            List identifiable languages
//!   watson-cli voices                               List synthesis voices
//!   watson-cli synthesize <voice> <out.wav> <text>  Synthesize text to a WAV file
//!   watson-cli pronounce <text>                     Show the IPA pronunciation of a word

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;
use watson_lib_rust::audio::{inspect_wav, AudioFormat};
use watson_lib_rust::language_translator::TranslateOptions;
use watson_lib_rust::text_to_speech::{PhonemeFormat, PronunciationOptions, SynthesizeOptions};
use watson_lib_rust::{LanguageTranslatorV3, TextToSpeechV1};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "translate" => cmd_translate(&args[2..]).await,
        "identify" => cmd_identify(&args[2..]).await,
        "languages" => cmd_languages().await,
        "voices" => cmd_voices().await,
        "synthesize" => cmd_synthesize(&args[2..]).await,
        "pronounce" => cmd_pronounce(&args[2..]).await,
        "version" | "--version" | "-V" => {
            println!("watson-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"watson-cli: Language Translator / Text to Speech command-line client

USAGE:
    watson-cli <COMMAND> [ARGS]

COMMANDS:
    translate <source> <target> <text>    Translate text between a language pair
    identify <text>                       Identify the language of text
    languages                             List identifiable languages
    voices                                List synthesis voices
    synthesize <voice> <out.wav> <text>   Synthesize text to a WAV file
    pronounce <text>                      Show the IPA pronunciation of a word
    version                               Show version information
    help                                  Show this help message

ENVIRONMENT:
    LANGUAGE_TRANSLATOR_URL, LANGUAGE_TRANSLATOR_APIKEY
    TEXT_TO_SPEECH_URL, TEXT_TO_SPEECH_APIKEY
    RUST_LOG                              Log filter (e.g. watson_lib_rust=debug)"#
    );
}

fn joined(args: &[String]) -> anyhow::Result<String> {
    let text = args.join(" ");
    if text.trim().is_empty() {
        bail!("missing <text>");
    }
    Ok(text)
}

async fn cmd_translate(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 3 {
        bail!("usage: watson-cli translate <source> <target> <text>");
    }
    let translator = LanguageTranslatorV3::from_env().context("building translator client")?;
    let options = TranslateOptions::new(joined(&args[2..])?, &args[0], &args[1]);
    let response = translator.translate(&options).await?;
    for t in &response.result.translations {
        println!("{}", t.translation);
    }
    Ok(())
}

async fn cmd_identify(args: &[String]) -> anyhow::Result<()> {
    let translator = LanguageTranslatorV3::from_env().context("building translator client")?;
    let response = translator.identify(&joined(args)?).await?;
    for lang in response.result.languages.iter().take(5) {
        println!("{:<6} {:.4}", lang.language, lang.confidence);
    }
    Ok(())
}

async fn cmd_languages() -> anyhow::Result<()> {
    let translator = LanguageTranslatorV3::from_env().context("building translator client")?;
    let response = translator.list_identifiable_languages().await?;
    for lang in &response.result.languages {
        println!("{:<6} {}", lang.language, lang.name);
    }
    Ok(())
}

async fn cmd_voices() -> anyhow::Result<()> {
    let tts = TextToSpeechV1::from_env().context("building text to speech client")?;
    let response = tts.list_voices().await?;
    for voice in &response.result.voices {
        let custom = if voice.customizable { "customizable" } else { "" };
        println!("{:<28} {:<6} {:<7} {}", voice.name, voice.language, voice.gender, custom);
    }
    Ok(())
}

async fn cmd_synthesize(args: &[String]) -> anyhow::Result<()> {
    if args.len() < 3 {
        bail!("usage: watson-cli synthesize <voice> <out.wav> <text>");
    }
    let tts = TextToSpeechV1::from_env().context("building text to speech client")?;
    let options = SynthesizeOptions::new(joined(&args[2..])?)
        .voice(&args[0])
        .accept(AudioFormat::Wav);
    let response = tts.synthesize(&options).await?;
    let info = inspect_wav(&response.result).context("service returned invalid WAV")?;
    tokio::fs::write(&args[1], &response.result)
        .await
        .with_context(|| format!("writing {}", args[1]))?;
    println!(
        "wrote {} ({} bytes, {} Hz, {} channel(s))",
        args[1],
        response.result.len(),
        info.sample_rate,
        info.channels
    );
    Ok(())
}

async fn cmd_pronounce(args: &[String]) -> anyhow::Result<()> {
    let tts = TextToSpeechV1::from_env().context("building text to speech client")?;
    let options = PronunciationOptions {
        format: Some(PhonemeFormat::Ipa),
        ..PronunciationOptions::new(joined(args)?)
    };
    let response = tts.get_pronunciation(&options).await?;
    println!("{}", response.result.pronunciation);
    Ok(())
}
