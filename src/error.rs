/// Faults a polling cycle can hit. Everything here is caught at the cycle
/// boundary and turned into a failure-report message; nothing is fatal
/// after startup.
#[derive(Debug)]
pub enum Error {
    Transport(String),
    Shape(String),
    MissingField(&'static str),
    UnknownStatus(String),
    Delivery(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Transport(msg) => write!(f, "Ошибка запроса к API: {msg}"),
            Error::Shape(msg) => write!(f, "Некорректный ответ API: {msg}"),
            Error::MissingField(field) => {
                write!(f, "В домашней работе отсутствует объект {field}")
            }
            Error::UnknownStatus(status) => write!(f, "Неизвестный статус: {status}"),
            Error::Delivery(msg) => {
                write!(f, "Ошибка отправки telegram сообщения: {msg}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
