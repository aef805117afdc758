use std::sync::OnceLock;

// 利用者向けメッセージのロケール。起動時に一度だけ設定する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Ja,
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        match value {
            "ja" => Locale::Ja,
            _ => Locale::En,
        }
    }
}

static LOCALE: OnceLock<Locale> = OnceLock::new();

pub fn init(locale: Locale) {
    let _ = LOCALE.set(locale);
}

fn current() -> Locale {
    *LOCALE.get().unwrap_or(&Locale::En)
}

pub fn t(key: &str) -> &'static str {
    translate(current(), key)
}

pub fn translate(locale: Locale, key: &str) -> &'static str {
    match (locale, key) {
        (Locale::En, "messages.update_failed") => "Unable to update booking status.",
        (Locale::Ja, "messages.update_failed") => "予約ステータスを更新できませんでした。",
        (Locale::En, "validation.status.required") => "The status field is required.",
        (Locale::Ja, "validation.status.required") => "ステータスは必須です。",
        (Locale::En, "validation.status.invalid") => {
            "The status must be either \"cancel\" or \"force_cancel\"."
        }
        (Locale::Ja, "validation.status.invalid") => {
            "ステータスは「cancel」または「force_cancel」のみ許可されています。"
        }
        (Locale::En, _) => "An unexpected error occurred.",
        (Locale::Ja, _) => "予期しないエラーが発生しました。",
    }
}
