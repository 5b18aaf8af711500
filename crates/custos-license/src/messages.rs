//! Operator-message builders for license enforcement.
//!
//! Every message carries the fixed `license` tag so the reconciler can
//! replace license notices without disturbing unrelated system messages.
//! Texts ship in English and German.

use custos_directory::{OperatorMessage, Severity};

/// Tag carried by every enforcement message.
pub const LICENSE_TAG: &str = "license";

fn license_message<'a>(
    severity: Severity,
    texts: impl IntoIterator<Item = (&'a str, String)>,
) -> OperatorMessage {
    OperatorMessage::new(severity, texts, [LICENSE_TAG])
}

/// Fixed notice: no license is installed.
#[must_use]
pub fn no_license() -> OperatorMessage {
    license_message(
        Severity::Urgent,
        [
            (
                "en",
                "No license is installed. The system is in restricted mode.".to_string(),
            ),
            (
                "de",
                "Es ist keine Lizenz installiert. Das System befindet sich im eingeschränkten Modus."
                    .to_string(),
            ),
        ],
    )
}

/// The tenant count exceeds the licensed client ceiling.
#[must_use]
pub fn over_client_limit(limit: i64, actual: i64) -> OperatorMessage {
    license_message(
        Severity::Urgent,
        [
            (
                "en",
                format!("The licensed client limit of {limit} is exceeded: {actual} clients are registered."),
            ),
            (
                "de",
                format!("Das lizenzierte Mandanten-Limit von {limit} ist überschritten: {actual} Mandanten sind registriert."),
            ),
        ],
    )
}

/// The enabled-account count exceeds the licensed user ceiling.
#[must_use]
pub fn over_user_limit(limit: i64, actual: i64) -> OperatorMessage {
    license_message(
        Severity::Urgent,
        [
            (
                "en",
                format!("The licensed user limit of {limit} is exceeded: {actual} accounts are enabled."),
            ),
            (
                "de",
                format!("Das lizenzierte Benutzer-Limit von {limit} ist überschritten: {actual} Konten sind aktiviert."),
            ),
        ],
    )
}

/// The managed-unit count exceeds the licensed unit ceiling.
#[must_use]
pub fn over_unit_limit(limit: i64, actual: i64) -> OperatorMessage {
    license_message(
        Severity::Urgent,
        [
            (
                "en",
                format!("The licensed unit limit of {limit} is exceeded: {actual} units are managed."),
            ),
            (
                "de",
                format!("Das lizenzierte Einheiten-Limit von {limit} ist überschritten: {actual} Einheiten werden verwaltet."),
            ),
        ],
    )
}

/// Fixed notice: the license has lapsed.
#[must_use]
pub fn expired() -> OperatorMessage {
    license_message(
        Severity::Urgent,
        [
            (
                "en",
                "The license has expired. The system is in restricted mode.".to_string(),
            ),
            (
                "de",
                "Die Lizenz ist abgelaufen. Das System befindet sich im eingeschränkten Modus."
                    .to_string(),
            ),
        ],
    )
}

/// The license lapses within the warning window.
#[must_use]
pub fn expiring_soon(days: i64) -> OperatorMessage {
    license_message(
        Severity::Warning,
        [
            ("en", format!("The license expires in {days} days.")),
            ("de", format!("Die Lizenz läuft in {days} Tagen ab.")),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_messages_carry_license_tag() {
        for message in [
            no_license(),
            over_client_limit(5, 6),
            over_user_limit(10, 12),
            over_unit_limit(100, 101),
            expired(),
            expiring_soon(3),
        ] {
            assert!(message.tags.contains(LICENSE_TAG));
        }
    }

    #[test]
    fn test_parameterized_messages_cite_numbers() {
        let message = over_user_limit(1, 2);
        let en = &message.text["en"];
        assert!(en.contains('1'));
        assert!(en.contains('2'));
        assert_eq!(message.severity, Severity::Urgent);
    }

    #[test]
    fn test_expiring_soon_is_warning() {
        let message = expiring_soon(2);
        assert_eq!(message.severity, Severity::Warning);
        assert!(message.text["en"].contains("2 days"));
    }

    #[test]
    fn test_messages_are_localized() {
        let message = no_license();
        assert!(message.text.contains_key("en"));
        assert!(message.text.contains_key("de"));
    }

    #[test]
    fn test_same_parameters_produce_equal_messages() {
        assert_eq!(over_client_limit(5, 6), over_client_limit(5, 6));
        assert_ne!(over_client_limit(5, 6), over_client_limit(5, 7));
    }
}
