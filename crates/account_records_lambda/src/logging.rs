use serde_json::{json, Value};

const COMPONENT: &str = "account_service";

pub fn log_info(event: &str, details: Value) {
    eprintln!("{}", log_line(None, event, details));
}

pub fn log_error(event: &str, details: Value) {
    eprintln!("{}", log_line(Some("error"), event, details));
}

fn log_line(level: Option<&str>, event: &str, details: Value) -> Value {
    let mut line = json!({
        "component": COMPONENT,
        "event": event,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "details": details,
    });
    if let (Some(level), Some(object)) = (level, line.as_object_mut()) {
        object.insert("level".to_string(), Value::from(level));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_lines_carry_level() {
        let line = log_line(Some("error"), "account_create_failed", json!({"sk_id": "u1"}));
        assert_eq!(line["level"], "error");
        assert_eq!(line["component"], "account_service");
        assert_eq!(line["details"]["sk_id"], "u1");
    }

    #[test]
    fn info_lines_omit_level() {
        let line = log_line(None, "accounts_listed", json!({"count": 2}));
        assert!(line.get("level").is_none());
        assert_eq!(line["event"], "accounts_listed");
    }
}
