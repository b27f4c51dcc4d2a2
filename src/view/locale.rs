//! UI languages and their message tables.

use serde::Serialize;

/// Display language, picked from the `Accept-Language` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    En,
    Ja,
}

impl Lang {
    /// `ja` when the header's first language starts with `ja`
    /// (case-insensitive), `en` otherwise.
    pub fn from_accept_language(header: Option<&str>) -> Self {
        match header {
            Some(value) if value.trim_start().to_ascii_lowercase().starts_with("ja") => Self::Ja,
            _ => Self::En,
        }
    }

    /// Value for the `lang` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }

    pub const fn messages(self) -> &'static Messages {
        match self {
            Self::En => &EN,
            Self::Ja => &JA,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Messages {
    pub title: &'static str,
    pub description: &'static str,
    pub trademark: &'static str,
    pub labels: Labels,
    pub feedback: Feedback,
}

#[derive(Debug, Serialize)]
pub struct Labels {
    pub data: &'static str,
    pub data_placeholder: &'static str,
    pub size: &'static str,
    pub size_placeholder: &'static str,
    pub format: &'static str,
    pub copy: &'static str,
    pub download: &'static str,
    pub reload: &'static str,
}

/// Strings the client script shows while the preview changes state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub copied: &'static str,
    pub copy_failed: &'static str,
    pub loading: &'static str,
    pub qr_error: &'static str,
}

pub static EN: Messages = Messages {
    title: "QR Code Placeholder Maker",
    description: "Specify the parameters to generate a QR code URL that can be used as a \
                  placeholder by setting it to the src attribute of an img tag.",
    trademark: "QR Code is a registered trademark of DENSO WAVE Inc.",
    labels: Labels {
        data: "Data",
        data_placeholder: "Enter your data",
        size: "Size (px)",
        size_placeholder: "e.g., 300",
        format: "File format",
        copy: "Copy",
        download: "Download",
        reload: "Reload",
    },
    feedback: Feedback {
        copied: "Copied!",
        copy_failed: "Copy failed",
        loading: "Loading...",
        qr_error: "Failed to generate QR code due to server error.",
    },
};

pub static JA: Messages = Messages {
    title: "QRコード プレースホルダー メーカー",
    description: "パラメータを指定して生成したQRコードのURLをimgタグのsrc属性に指定して\
                  プレースホルダーとして利用できます。",
    trademark: "QRコードは（株）デンソーウェーブの登録商標です",
    labels: Labels {
        data: "データ",
        data_placeholder: "データを入力してください",
        size: "サイズ(px)",
        size_placeholder: "例: 300",
        format: "ファイル形式",
        copy: "コピー",
        download: "ダウンロード",
        reload: "再読み込み",
    },
    feedback: Feedback {
        copied: "コピーしました!",
        copy_failed: "コピーに失敗しました",
        loading: "読み込み中...",
        qr_error: "サーバーエラーによりQRコードの生成に失敗しました。",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_accept_language() {
        assert_eq!(Lang::from_accept_language(None), Lang::En);
        assert_eq!(Lang::from_accept_language(Some("")), Lang::En);
        assert_eq!(Lang::from_accept_language(Some("ja,en;q=0.8")), Lang::Ja);
        assert_eq!(Lang::from_accept_language(Some("JA-jp")), Lang::Ja);
        assert_eq!(Lang::from_accept_language(Some("en-US,ja;q=0.9")), Lang::En);
    }

    #[test]
    fn test_description_continuation() {
        assert!(EN.description.contains("a placeholder by"));
        assert!(JA.description.contains("指定してプレースホルダー"));
    }

    #[test]
    fn test_feedback_json_keys() {
        let json = serde_json::to_value(&EN.feedback).unwrap();
        assert_eq!(json["copyFailed"], "Copy failed");
        assert_eq!(json["qrError"], "Failed to generate QR code due to server error.");
    }
}
