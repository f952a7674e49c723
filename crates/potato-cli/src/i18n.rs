use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    pub fn label(self) -> &'static str {
        match self {
            Locale::En => "EN",
            Locale::Ja => "JA",
        }
    }
}

/// Substitute the `{name}` marker of a confirmation string.
pub fn with_name(text: &str, name: &str) -> String {
    text.replace("{name}", name)
}

/// All translatable strings in the application.
/// Call `t(locale)` to get the struct for a given locale.
pub struct T {
    // ── Senders ──
    pub sender_user: &'static str,
    pub sender_bot: &'static str,
    pub sender_system: &'static str,

    // ── Chat ──
    pub chat_error: &'static str,

    // ── Templates ──
    pub no_templates: &'static str,
    pub enter_template_name: &'static str,
    pub select_template: &'static str,
    pub confirm_load: &'static str,
    pub confirm_reset: &'static str,
    pub confirm_delete: &'static str,
    pub error_prefix: &'static str,

    // ── TUI chrome ──
    pub chat_title: &'static str,
    pub waiting_reply: &'static str,
    pub input_title: &'static str,
    pub templates_title: &'static str,
    pub template_name_title: &'static str,
    pub debug_log_title: &'static str,
    pub alert_title: &'static str,
    pub alert_hint: &'static str,
    pub confirm_title: &'static str,
    pub confirm_hint: &'static str,
    pub help: &'static str,

    // ── Command mode ──
    pub confirm_stdin_suffix: &'static str,
}

pub fn t(locale: Locale) -> T {
    match locale {
        Locale::En => T {
            // Senders
            sender_user: "You",
            sender_bot: "Potato",
            sender_system: "System",

            // Chat
            chat_error: "Sorry, an error occurred. Please try again.",

            // Templates
            no_templates: "No templates saved",
            enter_template_name: "Please enter a template name.",
            select_template: "Please select a template.",
            confirm_load: "Load template '{name}'? Any unsaved progress will be lost.",
            confirm_reset: "Reset to template '{name}'? All current progress will be destroyed.",
            confirm_delete: "Delete template '{name}'? This cannot be undone.",
            error_prefix: "Error: ",

            // TUI chrome
            chat_title: "Chat",
            waiting_reply: "waiting for reply…",
            input_title: "Message",
            templates_title: "Templates",
            template_name_title: "New template name",
            debug_log_title: "Debug log",
            alert_title: "Notice",
            alert_hint: "[Enter] OK",
            confirm_title: "Confirm",
            confirm_hint: "[y] Yes   [n] No",
            help: "Tab focus · Enter send/save · F3 load · F4 reset · F5 refresh · F8 delete · Esc quit",

            // Command mode
            confirm_stdin_suffix: " [y/N] ",
        },
        Locale::Ja => T {
            // Senders
            sender_user: "あなた",
            sender_bot: "ポテト",
            sender_system: "システム",

            // Chat
            chat_error: "申し訳ありません、エラーが発生しました。もう一度お試しください。",

            // Templates
            no_templates: "保存されたテンプレートはありません",
            enter_template_name: "テンプレート名を入力してください。",
            select_template: "テンプレートを選択してください。",
            confirm_load: "テンプレート「{name}」を読み込みますか？保存されていない進行状況は失われます。",
            confirm_reset: "テンプレート「{name}」にリセットしますか？現在の進行状況はすべて破棄されます。",
            confirm_delete: "テンプレート「{name}」を削除しますか？この操作は元に戻せません。",
            error_prefix: "エラー: ",

            // TUI chrome
            chat_title: "チャット",
            waiting_reply: "応答を待っています…",
            input_title: "メッセージ",
            templates_title: "テンプレート",
            template_name_title: "新しいテンプレート名",
            debug_log_title: "デバッグログ",
            alert_title: "お知らせ",
            alert_hint: "[Enter] OK",
            confirm_title: "確認",
            confirm_hint: "[y] はい   [n] いいえ",
            help: "Tab 移動 · Enter 送信/保存 · F3 読込 · F4 リセット · F5 更新 · F8 削除 · Esc 終了",

            // Command mode
            confirm_stdin_suffix: " [y/N] ",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_uppercase_codes() {
        assert_eq!(Locale::En.label(), "EN");
        assert_eq!(Locale::Ja.label(), "JA");
    }

    #[test]
    fn confirmations_carry_name_marker() {
        for locale in [Locale::En, Locale::Ja] {
            let t = t(locale);
            for text in [t.confirm_load, t.confirm_reset, t.confirm_delete] {
                assert!(text.contains("{name}"), "{locale}: {text}");
            }
        }
    }

    #[test]
    fn load_and_reset_wording_differs() {
        for locale in [Locale::En, Locale::Ja] {
            let t = t(locale);
            assert_ne!(t.confirm_load, t.confirm_reset);
        }
    }

    #[test]
    fn with_name_substitutes() {
        assert_eq!(
            with_name(t(Locale::En).confirm_delete, "early"),
            "Delete template 'early'? This cannot be undone."
        );
    }

    #[test]
    fn locale_parses_from_config_json() {
        let locale: Locale = serde_json::from_str("\"ja\"").unwrap();
        assert_eq!(locale, Locale::Ja);
        assert_eq!(locale.to_string(), "ja");
    }
}
