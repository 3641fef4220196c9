//! Identifier validation and quoting shared by every platform.
//!
//! Names in the schema model are stored the way the caller wrote them. A name
//! wrapped in backticks, double quotes or brackets is treated as explicitly
//! quoted and keeps its quoting in every generated statement; any other name
//! is only quoted when one of its dot-separated parts is a reserved keyword
//! of the active platform.
//!
//! Quoting doubles the platform's quote character inside the name, so a
//! hostile identifier can never terminate the quoted section early.

use crate::error::{PlatformError, Result};

/// Maximum identifier length accepted by the model (bytes).
/// - PostgreSQL: 63 bytes
/// - MySQL: 64 characters
/// - Oracle: 30 bytes (128 on 12.2+)
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Validate an identifier for obviously broken input.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes
/// - Identifiers exceeding maximum length
///
/// # Errors
///
/// Returns `PlatformError::InvalidDefinition` with a descriptive message.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PlatformError::invalid_definition(
            "Identifier cannot be empty",
        ));
    }

    if name.contains('\0') {
        return Err(PlatformError::invalid_definition(format!(
            "Identifier contains null byte: {:?}",
            name
        )));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(PlatformError::invalid_definition(format!(
            "Identifier exceeds maximum length of {} bytes (got {} bytes): {:?}",
            MAX_IDENTIFIER_LENGTH,
            name.len(),
            name
        )));
    }

    Ok(())
}

/// Quote a single identifier part with the given quote character.
///
/// # Examples
///
/// ```
/// use sql_dialects::core::identifier::quote_single;
/// assert_eq!(quote_single("users", '`'), "`users`");
/// assert_eq!(quote_single("table`name", '`'), "`table``name`");
/// ```
pub fn quote_single(name: &str, quote: char) -> String {
    let doubled: String = [quote, quote].iter().collect();
    format!("{q}{}{q}", name.replace(quote, &doubled), q = quote)
}

/// Quote a possibly dotted identifier, quoting every part separately.
///
/// # Examples
///
/// ```
/// use sql_dialects::core::identifier::quote_dotted;
/// assert_eq!(quote_dotted("a.b", '"'), "\"a\".\"b\"");
/// ```
pub fn quote_dotted(name: &str, quote: char) -> String {
    name.split('.')
        .map(|part| quote_single(part, quote))
        .collect::<Vec<_>>()
        .join(".")
}

/// Quote a string literal by doubling single quotes.
pub fn quote_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Returns true when the raw name is wrapped in one of the recognized quote styles.
pub fn is_identifier_quoted(raw: &str) -> bool {
    matches!(raw.chars().next(), Some('`') | Some('"') | Some('['))
}

/// Strip every quote character from a raw name.
pub fn trim_quotes(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '`' | '"' | '[' | ']'))
        .collect()
}

/// A parsed schema object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    name: String,
    quoted: bool,
}

impl Identifier {
    /// Parse a raw name as written in the schema model.
    pub fn parse(raw: &str) -> Self {
        if is_identifier_quoted(raw) {
            Self {
                name: trim_quotes(raw),
                quoted: true,
            }
        } else {
            Self {
                name: raw.to_string(),
                quoted: false,
            }
        }
    }

    /// Unquoted name, including any namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the caller explicitly quoted the name.
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// Namespace part of a dotted name (`schema` in `schema.table`).
    pub fn namespace(&self) -> Option<&str> {
        self.name.split_once('.').map(|(ns, _)| ns)
    }

    /// Name without its namespace.
    pub fn short_name(&self) -> &str {
        match self.name.split_once('.') {
            Some((_, short)) => short,
            None => &self.name,
        }
    }

    /// Render the name, quoting the parts that need it.
    ///
    /// A part is quoted when the identifier was explicitly quoted or when
    /// `is_keyword` reports the part as reserved.
    pub fn render(&self, quote: char, is_keyword: impl Fn(&str) -> bool) -> String {
        self.name
            .split('.')
            .map(|part| {
                if self.quoted || is_keyword(part) {
                    quote_single(part, quote)
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Append a suffix, truncating the identifier so the result fits `max_length`.
pub fn with_suffix(identifier: &str, suffix: &str, max_length: usize) -> String {
    let room = max_length.saturating_sub(suffix.len());
    let mut base: String = identifier.to_string();
    if base.len() > room {
        let mut cut = room;
        while !base.is_char_boundary(cut) {
            cut -= 1;
        }
        base.truncate(cut);
    }
    base + suffix
}

/// Validate a check constraint definition before embedding it in DDL.
///
/// Check constraints are copied verbatim into CREATE TABLE statements, so
/// anything that could end the statement or hide the rest of it is refused.
///
/// # Rejected Patterns
///
/// - Semicolons (multiple statements)
/// - SQL comments (`--`, `/*`, `*/`)
/// - `EXEC`/`EXECUTE` keywords
pub fn validate_check_constraint(definition: &str) -> Result<()> {
    if definition.trim().is_empty() {
        return Err(PlatformError::invalid_definition(
            "Check constraint definition cannot be empty",
        ));
    }

    if definition.contains(';') {
        return Err(PlatformError::invalid_definition(format!(
            "Check constraint contains semicolon: {:?}",
            definition
        )));
    }

    if definition.contains("--") || definition.contains("/*") || definition.contains("*/") {
        return Err(PlatformError::invalid_definition(format!(
            "Check constraint contains SQL comment markers: {:?}",
            definition
        )));
    }

    let lower = definition.to_lowercase();
    if lower.split_whitespace().any(|word| {
        word == "exec"
            || word == "execute"
            || word.starts_with("exec(")
            || word.starts_with("execute(")
    }) {
        return Err(PlatformError::invalid_definition(format!(
            "Check constraint contains EXEC/EXECUTE keyword: {:?}",
            definition
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn test_validate_identifier_normal() {
        assert!(validate_identifier("users").is_ok());
        assert!(validate_identifier("my_table").is_ok());
        assert!(validate_identifier("column with spaces").is_ok());
        assert!(validate_identifier("日本語").is_ok());
    }

    #[test]
    fn test_validate_identifier_rejects_empty() {
        let result = validate_identifier("");
        assert!(result.unwrap_err().to_string().contains("empty"));
    }

    #[test]
    fn test_validate_identifier_rejects_null_byte() {
        let result = validate_identifier("table\0name");
        assert!(result.unwrap_err().to_string().contains("null byte"));
    }

    #[test]
    fn test_validate_identifier_rejects_too_long() {
        let long_name = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
        let result = validate_identifier(&long_name);
        assert!(result.unwrap_err().to_string().contains("maximum length"));
        assert!(validate_identifier(&"a".repeat(MAX_IDENTIFIER_LENGTH)).is_ok());
    }

    // =========================================================================
    // Quoting tests
    // =========================================================================

    #[test]
    fn test_quote_single_backtick() {
        assert_eq!(quote_single("users", '`'), "`users`");
        assert_eq!(quote_single("a`b`c", '`'), "`a``b``c`");
    }

    #[test]
    fn test_quote_single_double_quote() {
        assert_eq!(quote_single("users", '"'), "\"users\"");
        assert_eq!(quote_single("table\"name", '"'), "\"table\"\"name\"");
    }

    #[test]
    fn test_quote_dotted() {
        assert_eq!(quote_dotted("a.b", '`'), "`a`.`b`");
        assert_eq!(quote_dotted("a.b", '"'), "\"a\".\"b\"");
        assert_eq!(quote_dotted("plain", '"'), "\"plain\"");
    }

    #[test]
    fn test_quote_injection_safely_quoted() {
        assert_eq!(
            quote_single("Robert\"); DROP TABLE Students;--", '"'),
            "\"Robert\"\"); DROP TABLE Students;--\""
        );
    }

    #[test]
    fn test_quote_string_literal() {
        assert_eq!(quote_string_literal("abc"), "'abc'");
        assert_eq!(quote_string_literal("it's"), "'it''s'");
    }

    // =========================================================================
    // Identifier tests
    // =========================================================================

    #[test]
    fn test_identifier_parse_quoted() {
        let ident = Identifier::parse("`order`");
        assert!(ident.is_quoted());
        assert_eq!(ident.name(), "order");

        let ident = Identifier::parse("[Weird Name]");
        assert!(ident.is_quoted());
        assert_eq!(ident.name(), "Weird Name");
    }

    #[test]
    fn test_identifier_namespace() {
        let ident = Identifier::parse("sales.orders");
        assert_eq!(ident.namespace(), Some("sales"));
        assert_eq!(ident.short_name(), "orders");

        let ident = Identifier::parse("orders");
        assert_eq!(ident.namespace(), None);
        assert_eq!(ident.short_name(), "orders");
    }

    #[test]
    fn test_identifier_render_quotes_keywords_only() {
        let is_kw = |s: &str| s.eq_ignore_ascii_case("order");
        assert_eq!(Identifier::parse("users").render('"', is_kw), "users");
        assert_eq!(Identifier::parse("order").render('"', is_kw), "\"order\"");
        assert_eq!(
            Identifier::parse("sales.order").render('`', is_kw),
            "sales.`order`"
        );
    }

    #[test]
    fn test_identifier_render_explicit_quotes() {
        let ident = Identifier::parse("\"Users\"");
        assert_eq!(ident.render('`', |_| false), "`Users`");
    }

    #[test]
    fn test_with_suffix_truncates() {
        assert_eq!(with_suffix("users", "_SEQ", 30), "users_SEQ");
        let long = "a".repeat(40);
        let result = with_suffix(&long, "_AI_PK", 30);
        assert_eq!(result.len(), 30);
        assert!(result.ends_with("_AI_PK"));
    }

    // =========================================================================
    // Check constraint validation tests
    // =========================================================================

    #[test]
    fn test_check_constraint_valid() {
        assert!(validate_check_constraint("value > 0").is_ok());
        assert!(validate_check_constraint("status IN ('active', 'inactive')").is_ok());
        assert!(validate_check_constraint("email LIKE '%@%'").is_ok());
    }

    #[test]
    fn test_check_constraint_rejects_semicolon() {
        let result = validate_check_constraint("1=1; DROP TABLE users");
        assert!(result.unwrap_err().to_string().contains("semicolon"));
    }

    #[test]
    fn test_check_constraint_rejects_comments() {
        assert!(validate_check_constraint("1=1 -- bypass").is_err());
        assert!(validate_check_constraint("1=1 /* c */ OR 1=1").is_err());
    }

    #[test]
    fn test_check_constraint_rejects_execute() {
        let result = validate_check_constraint("execute('SELECT 1')");
        assert!(result.unwrap_err().to_string().contains("EXEC"));
        assert!(validate_check_constraint("status = 'executive'").is_ok());
    }

    #[test]
    fn test_check_constraint_rejects_empty() {
        assert!(validate_check_constraint("   ").is_err());
    }
}
