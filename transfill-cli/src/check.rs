use comfy_table::{Table, presets::UTF8_FULL};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use transfill::{
    Config, FixReport, FsStore, HttpTranslator, MissingEntry, RetryPolicy, TreeStore,
    check_translations, fix_translations,
};

pub async fn run_check_command(fix: bool, json: bool) -> Result<(), String> {
    let config = Config::load().map_err(|e| e.to_string())?;
    tracing::debug!(
        path = %config.i18n_path.display(),
        service = %config.translation_service,
        "loaded configuration"
    );
    let store = FsStore::new(&config.i18n_path);

    if !json {
        println!("{}", style("\n🔍 Scanning for missing translations...\n").blue());
    }

    let source = store
        .load_required(&config.source_language)
        .map_err(|e| e.to_string())?;
    let missing = check_translations(&source, &config.target_languages, &store)
        .map_err(|e| e.to_string())?;

    if missing.is_empty() {
        if json {
            println!("{}", render_json(&missing, None)?);
        } else {
            println!("{}", style("✅ No missing translations found!\n").green());
        }
        return Ok(());
    }

    if !json {
        println!(
            "{}",
            style(format!("📊 Found {} missing translations.\n", missing.len())).yellow()
        );
        println!("{}", missing_table(&missing));
    }

    if !fix {
        if json {
            println!("{}", render_json(&missing, None)?);
        } else {
            println!(
                "{}",
                style("\n💡 To complete translations, run: transfill check --fix\n").blue()
            );
        }
        return Ok(());
    }

    config.require_api_key().map_err(|e| e.to_string())?;
    let translator = HttpTranslator::new(&config).map_err(|e| e.to_string())?;

    let total = missing.len() * config.target_languages.len();
    let bar = progress_bar(total as u64, json);
    if !json {
        println!("{}", style("🚀 Starting translations...\n").blue());
    }

    let report = fix_translations(
        &config,
        &translator,
        &store,
        &RetryPolicy::default(),
        |event| bar.set_position(event.completed as u64),
    )
    .await
    .map_err(|e| e.to_string())?;
    bar.finish();

    if json {
        println!("{}", render_json(&missing, Some(&report))?);
    } else {
        println!("\n📋 Translation Results:\n");
        println!("{}", results_table(&missing, &report));
        println!("{}", style("\n✅ Translation process completed!\n").green());
    }

    Ok(())
}

fn progress_bar(total: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("🔄 Progress: [{bar:30}] {percent}% | {pos}/{len}")
            .expect("valid progress template")
            .progress_chars("█░"),
    );
    bar
}

fn missing_table(missing: &[MissingEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["🔑 Key", "📝 Source Text", "🌐 Missing Languages"]);
    for entry in missing {
        table.add_row(vec![
            entry.key.clone(),
            entry.source_value.clone(),
            entry.missing_languages.join(", "),
        ]);
    }
    table
}

fn results_table(missing: &[MissingEntry], report: &FixReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["🔑 Key", "📝 Source Text", "🌍 Translation"]);
    for entry in missing {
        let outcome = match report.translation_for(&entry.key) {
            Some(translation) => style(format!("✓ {translation}")).green().to_string(),
            None => style("❌ Translation failed").red().to_string(),
        };
        table.add_row(vec![entry.key.clone(), entry.source_value.clone(), outcome]);
    }
    table
}

fn render_json(missing: &[MissingEntry], report: Option<&FixReport>) -> Result<String, String> {
    let payload = json!({
        "summary": {
            "missing_entries": missing.len(),
            "translated": report.map(|r| r.translated.len()),
            "failed": report.map(|r| r.failed.len()),
        },
        "missing": missing,
        "report": report,
    });
    serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use transfill::TranslatedItem;

    fn sample_missing() -> Vec<MissingEntry> {
        vec![
            MissingEntry::new("home.title", "Welcome", "tr"),
            MissingEntry::new("home.description", "Hello World", "fr"),
        ]
    }

    #[test]
    fn test_missing_table_lists_all_entries() {
        let rendered = missing_table(&sample_missing()).to_string();
        assert!(rendered.contains("home.title"));
        assert!(rendered.contains("Hello World"));
        assert!(rendered.contains("tr"));
    }

    #[test]
    fn test_results_table_marks_failures() {
        let report = FixReport {
            translated: vec![TranslatedItem {
                key: "home.title".to_string(),
                language: "tr".to_string(),
                translation: "Hoşgeldin".to_string(),
            }],
            failed: vec![("home.description".to_string(), "fr".to_string())],
            attempted: 2,
            total: 2,
        };
        let rendered = results_table(&sample_missing(), &report).to_string();
        assert!(rendered.contains("Hoşgeldin"));
        assert!(rendered.contains("Translation failed"));
    }

    #[test]
    fn test_render_json_is_valid_json() {
        let rendered = render_json(&sample_missing(), None).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["summary"]["missing_entries"], 2);
        assert_eq!(parsed["missing"][0]["key"], "home.title");
        assert!(parsed["report"].is_null());
    }
}
