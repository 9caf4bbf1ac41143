use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}][\p{L}\p{M} .'-]*$").expect("Invalid name regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("Invalid url regex"));

pub const MAX_EMAIL_LENGTH: usize = 254;

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    // 姓名长度校验：2 <= x <= 100（按字符计）
    let length = name.chars().count();
    if !(2..=100).contains(&length) {
        return Err("O nome deve ter entre 2 e 100 caracteres");
    }
    // 只允许字母、空格、撇号、点与连字符
    if !NAME_RE.is_match(name) {
        return Err("O nome contém caracteres inválidos");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > MAX_EMAIL_LENGTH || !EMAIL_RE.is_match(email) {
        return Err("E-mail inválido");
    }
    Ok(())
}

/// 课时内容地址只接受 http/https
pub fn validate_url(url: &str) -> Result<(), &'static str> {
    if !URL_RE.is_match(url) {
        return Err("URL do conteúdo inválida (use http:// ou https://)");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：字母 + 数字
/// - 不能是常见弱密码
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("A senha deve ter pelo menos 8 caracteres");
    }

    if !password.chars().any(|c| c.is_alphabetic()) {
        errors.push("A senha deve conter pelo menos uma letra");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("A senha deve conter pelo menos um número");
    }

    // 常见弱密码检查
    let weak_passwords = [
        "password1",
        "senha123",
        "senha1234",
        "qwerty123",
        "abc12345",
        "abcd1234",
        "mudar123",
        "admin123",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Senha muito comum, escolha uma senha mais forte");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("aprender2024").is_valid);
        assert!(validate_password("Segura#Senha9").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"A senha deve ter pelo menos 8 caracteres")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("somenteletras");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"A senha deve conter pelo menos um número")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Senha123");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Senha muito comum, escolha uma senha mais forte")
        );
    }

    #[test]
    fn test_names() {
        assert!(validate_name("João da Silva").is_ok());
        assert!(validate_name("Ana-Maria O'Neil").is_ok());
        assert!(validate_name("J").is_err());
        assert!(validate_name("<script>").is_err());
    }

    #[test]
    fn test_emails() {
        assert!(validate_email("aluno@escola.com.br").is_ok());
        assert!(validate_email("aluno@").is_err());
        assert!(validate_email("sem-arroba.com").is_err());
    }

    #[test]
    fn test_urls() {
        assert!(validate_url("https://www.youtube.com/watch?v=abc").is_ok());
        assert!(validate_url("http://cdn.example.com/aula.mp4").is_ok());
        assert!(validate_url("ftp://example.com/file").is_err());
        assert!(validate_url("javascript:alert(1)").is_err());
    }
}
