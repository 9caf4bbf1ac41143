//! 表单字段的宽松反序列化
//!
//! HTML 表单中的复选框只在勾选时提交（值通常为 `on`），
//! 可选的文本字段则可能以空串出现。

use serde::Deserialize;

/// 复选框：缺省或空串为 false，`on`/`true`/`1`/`yes` 为 true
pub fn deserialize_checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(
        raw.as_deref().map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("on" | "true" | "1" | "yes")
    ))
}

/// 去除首尾空白，空串视为未填写
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Checkbox {
        #[serde(default, deserialize_with = "deserialize_checkbox")]
        remember_me: bool,
    }

    #[test]
    fn test_checkbox_values() {
        let parse = |body: &str| serde_json::from_str::<Checkbox>(body).unwrap().remember_me;
        assert!(parse(r#"{"remember_me":"on"}"#));
        assert!(parse(r#"{"remember_me":"true"}"#));
        assert!(!parse(r#"{"remember_me":""}"#));
        assert!(!parse("{}"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Redes ")), Some("Redes".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
