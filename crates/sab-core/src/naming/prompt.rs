//! Prompt templates for file and folder naming.
//!
//! Templates use two positional `%s` slots: the message text, then the
//! original (or default) name. `%%` renders a literal `%`.

use crate::config::RenameConfig;

use super::sanitize::{FILE_NAME_MAX_LEN, FOLDER_NAME_MAX_LEN};

const FILE_TEMPLATE_HEAD: &str = "Based on the message below, suggest a file name for the attached file.\n\
Requirements:\n\
1. The name must be concise and reflect what the file contains.\n";

const FOLDER_TEMPLATE_HEAD: &str = "Based on the message below, suggest a folder name for this album.\n\
Requirements:\n\
1. The name must be concise and reflect what the album contains.\n";

pub fn build_file_prompt(cfg: &RenameConfig, message_text: &str, original_base: &str) -> String {
    if !cfg.prompt_template.is_empty() {
        return render(&cfg.prompt_template, message_text, original_base);
    }

    let template = format!(
        "{FILE_TEMPLATE_HEAD}\
2. {language}\n\
3. Use only letters, digits, underscores and hyphens (letters may be in any script); no other special characters.\n\
4. Keep it within {FILE_NAME_MAX_LEN} characters.\n\
5. Reply with the file name only: no extension, no quotes, no explanation.\n\
\n\
Message: %s\n\
Original file name: %s\n\
\n\
New file name:",
        language = language_rule(cfg),
    );
    render(&template, message_text, original_base)
}

pub fn build_folder_prompt(cfg: &RenameConfig, message_text: &str, default_name: &str) -> String {
    if !cfg.prompt_template.is_empty() {
        return render(&cfg.prompt_template, message_text, default_name);
    }

    let template = format!(
        "{FOLDER_TEMPLATE_HEAD}\
2. {language}\n\
3. Use only letters, digits, underscores and hyphens (letters may be in any script); no other special characters.\n\
4. Keep it within {FOLDER_NAME_MAX_LEN} characters.\n\
5. Reply with the folder name only, no quotes, no explanation.\n\
\n\
Message: %s\n\
Default folder name: %s\n\
\n\
New folder name:",
        language = language_rule(cfg),
    );
    render(&template, message_text, default_name)
}

fn language_rule(cfg: &RenameConfig) -> String {
    match cfg.language.as_deref().map(str::trim) {
        Some(lang) if !lang.is_empty() => format!("Write the name in {lang}."),
        _ => "Write the name in whatever language best fits the message.".to_string(),
    }
}

/// Substitute `text` then `name` into the first two `%s` slots of `template`.
///
/// Extra `%s` slots are left untouched; a template with fewer slots simply
/// drops the values it has no room for. Substituted values are never
/// re-scanned, so a `%s` inside the message text stays literal.
pub fn render(template: &str, text: &str, name: &str) -> String {
    let mut args = [text, name].into_iter();
    let mut out = String::with_capacity(template.len() + text.len() + name.len());

    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') => {
                chars.next();
                match args.next() {
                    Some(v) => out.push_str(v),
                    None => out.push_str("%s"),
                }
            }
            _ => out.push('%'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_fills_slots_in_order() {
        assert_eq!(render("t=%s n=%s", "hello", "a.txt"), "t=hello n=a.txt");
    }

    #[test]
    fn render_handles_percent_escapes_and_extra_slots() {
        assert_eq!(render("100%% %s|%s|%s", "a", "b"), "100% a|b|%s");
        assert_eq!(render("only %s", "a", "b"), "only a");
        assert_eq!(render("trailing %", "a", "b"), "trailing %");
        assert_eq!(render("%d %s", "a", "b"), "%d a");
    }

    #[test]
    fn render_does_not_expand_inside_values() {
        assert_eq!(render("%s/%s", "50%s off", "x"), "50%s off/x");
    }

    #[test]
    fn default_file_prompt_embeds_inputs_and_limit() {
        let cfg = RenameConfig::default();
        let p = build_file_prompt(&cfg, "Q3 revenue deck", "IMG_0001");
        assert!(p.contains("Message: Q3 revenue deck\n"));
        assert!(p.contains("Original file name: IMG_0001\n"));
        assert!(p.contains("within 50 characters"));
        assert!(p.contains("no extension"));
        assert!(p.contains("whatever language"));
        assert!(!p.contains("%s"));
    }

    #[test]
    fn default_folder_prompt_uses_folder_limit_and_language() {
        let cfg = RenameConfig {
            language: Some("Chinese".to_string()),
            ..RenameConfig::default()
        };
        let p = build_folder_prompt(&cfg, "holiday photos", "album_42");
        assert!(p.contains("Default folder name: album_42\n"));
        assert!(p.contains("within 30 characters"));
        assert!(p.contains("Write the name in Chinese."));
    }

    #[test]
    fn custom_template_replaces_both_defaults() {
        let cfg = RenameConfig {
            prompt_template: "Name this: %s (was %s)".to_string(),
            ..RenameConfig::default()
        };
        assert_eq!(
            build_file_prompt(&cfg, "text", "base"),
            "Name this: text (was base)"
        );
        assert_eq!(
            build_folder_prompt(&cfg, "text", "dir"),
            "Name this: text (was dir)"
        );
    }
}
