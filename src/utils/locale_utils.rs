use actix_web::HttpRequest;
use log::{debug, error};
use serde_json::Value;
use std::{fs, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    En,
    Fr,
}

impl Lang {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "fr" => Self::Fr,
            _ => Self::En,
        }
    }

    fn folder(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }
}

fn load_message_file(lang: Lang, namespace: Namespace) -> Value {
    let file_path = Path::new("locales")
        .join(lang.folder())
        .join(format!("{}.json", namespace.as_str()));

    match fs::read_to_string(&file_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(json) => {
                debug!("Loaded messages from {:?}", file_path);
                json
            }
            Err(err) => {
                error!("Failed to parse JSON from {:?}: {}", file_path, err);
                Value::Null
            }
        },
        Err(err) => {
            debug!("No message file at {:?}: {}", file_path, err);
            Value::Null
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Namespace {
    Dashboard,
    Validation,
}

impl Namespace {
    fn as_str(self) -> &'static str {
        match self {
            Namespace::Dashboard => "dashboard",
            Namespace::Validation => "validation",
        }
    }
}

/// Notices for one request language. Keys are dotted paths into the
/// namespace file; a missing file or key falls back to the inline English.
#[derive(Debug)]
pub struct Messages {
    pub dashboard: Value,
    pub validation: Value,
}

impl Messages {
    pub fn new(lang: Lang) -> Self {
        Self {
            dashboard: load_message_file(lang, Namespace::Dashboard),
            validation: load_message_file(lang, Namespace::Validation),
        }
    }

    pub fn get(&self, namespace: Namespace, path: &str) -> Option<&Value> {
        let root = match namespace {
            Namespace::Dashboard => &self.dashboard,
            Namespace::Validation => &self.validation,
        };

        let mut current = root;
        for key in path.split('.') {
            match current.get(key) {
                Some(next) => current = next,
                None => {
                    debug!(
                        "Key '{}' not found in path '{}.{}'",
                        key,
                        namespace.as_str(),
                        path
                    );
                    return None;
                }
            }
        }
        Some(current)
    }

    pub fn get_str(&self, namespace: Namespace, path: &str, fallback: &str) -> String {
        self.get(namespace, path)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    }

    pub fn get_dashboard_message(&self, path: &str, fallback: &str) -> String {
        self.get_str(Namespace::Dashboard, path, fallback)
    }

    pub fn get_validation_message(&self, path: &str, fallback: &str) -> String {
        self.get_str(Namespace::Validation, path, fallback)
    }
}

pub fn get_lang(req: &HttpRequest) -> Lang {
    req.headers()
        .get("Accept-Language")
        .and_then(|value| value.to_str().ok())
        .and_then(|header| {
            header
                .split(',')
                .next()
                .and_then(|tag| tag.split(['-', ';']).next())
        })
        .map(Lang::from_code)
        .unwrap_or(Lang::En)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use serde_json::json;

    #[test]
    fn accept_language_picks_first_tag() {
        let req = TestRequest::default()
            .insert_header(("Accept-Language", "fr-FR,fr;q=0.9,en;q=0.8"))
            .to_http_request();
        assert_eq!(get_lang(&req), Lang::Fr);

        let req = TestRequest::default()
            .insert_header(("Accept-Language", "wo"))
            .to_http_request();
        assert_eq!(get_lang(&req), Lang::En);

        assert_eq!(get_lang(&TestRequest::default().to_http_request()), Lang::En);
    }

    #[test]
    fn nested_keys_resolve_and_missing_ones_fall_back() {
        let messages = Messages {
            dashboard: json!({ "users": { "create": { "success": "Utilisateur créé." } } }),
            validation: Value::Null,
        };
        assert_eq!(
            messages.get_dashboard_message("users.create.success", "User created."),
            "Utilisateur créé."
        );
        assert_eq!(
            messages.get_dashboard_message("users.delete.success", "User deleted."),
            "User deleted."
        );
        assert_eq!(
            messages.get_validation_message("phone.invalid", "Invalid phone number"),
            "Invalid phone number"
        );
    }

    #[test]
    fn english_notices_ship_with_the_crate() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("locales/en/dashboard.json");
        let content = fs::read_to_string(path).unwrap();
        let parsed: Value = serde_json::from_str(&content).unwrap();
        assert!(parsed.get("users").is_some());
    }
}
