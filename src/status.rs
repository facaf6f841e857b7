use serde_json::Value;

use crate::error::Error;

/// Builds the notification text for a single homework record. Pure; the
/// verdict wording is fixed by the review service and must not drift.
pub fn parse_status(homework: &Value) -> Result<String, Error> {
    let name = homework
        .get("homework_name")
        .and_then(|v| v.as_str())
        .ok_or(Error::MissingField("homework_name"))?;

    let status = homework
        .get("status")
        .and_then(|v| v.as_str())
        .ok_or(Error::MissingField("status"))?;

    let verdict = match status {
        "approved" => "Работа проверена: ревьюеру всё понравилось. Ура!",
        "reviewing" => "Работа взята на проверку ревьюером.",
        "rejected" => "Работа проверена: у ревьюера есть замечания.",
        other => return Err(Error::UnknownStatus(other.to_string())),
    };

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {verdict}"
    ))
}
