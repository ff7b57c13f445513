use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use console::style;

use transfill::{Config, config::parse_language_list};

use crate::validation::validate_language_code;

pub fn run_config_command() -> Result<(), String> {
    let mut stdin = io::stdin().lock();
    run_config_with_input(&mut stdin)
}

/// Prompts for every setting, keeping the current value on empty input
/// (except the API key, which must be provided), and rewrites `.env`.
pub fn run_config_with_input(input: &mut impl BufRead) -> Result<(), String> {
    let config = Config::load().map_err(|e| e.to_string())?;

    println!("{}", style("\n🌍 Update Translation Settings\n").blue().bold());

    let current_key = if config.api_key.is_empty() {
        "NONE".to_string()
    } else {
        config.api_key.clone()
    };
    let api_key = ask(input, &format!("Enter new API Key (current: {current_key}): "))?;
    if api_key.is_empty() {
        return Err("API Key cannot be empty".to_string());
    }

    let source = ask(
        input,
        &format!("Enter source language code (current: {}): ", config.source_language),
    )?;
    let targets = ask(
        input,
        &format!(
            "Enter target languages (comma-separated) (current: {}): ",
            config.target_languages.join(", ")
        ),
    )?;
    let service = ask(
        input,
        &format!(
            "Select API service (google, deepl, openai, gemini) (current: {}): ",
            config.translation_service
        ),
    )?;
    let path = ask(
        input,
        &format!("Enter i18n directory path (current: {}): ", config.i18n_path.display()),
    )?;

    let source_language = if source.is_empty() {
        config.source_language.clone()
    } else {
        source
    };
    validate_language_code(&source_language)?;

    let target_languages = if targets.is_empty() {
        config.target_languages.clone()
    } else {
        parse_language_list(&targets)
    };
    if target_languages.is_empty() {
        return Err("Target languages cannot be empty".to_string());
    }
    for lang in &target_languages {
        validate_language_code(lang)?;
    }

    let translation_service = if service.is_empty() {
        config.translation_service
    } else {
        service.parse().map_err(|e: transfill::Error| e.to_string())?
    };

    let i18n_path = if path.is_empty() {
        config.i18n_path.clone()
    } else {
        PathBuf::from(path)
    };

    let updated = Config {
        api_key,
        source_language,
        target_languages,
        translation_service,
        i18n_path,
    };
    updated
        .write_env(Path::new(".env"))
        .map_err(|e| e.to_string())?;

    println!("{}", style("\n✅ Configuration updated successfully!\n").green().bold());
    Ok(())
}

fn ask(input: &mut impl BufRead, prompt: &str) -> Result<String, String> {
    print!("{prompt}");
    io::stdout().flush().map_err(|e| e.to_string())?;
    let mut line = String::new();
    input.read_line(&mut line).map_err(|e| e.to_string())?;
    Ok(line.trim().to_string())
}
