//! Telegram webhook update envelope.
//!
//! Only the fields the ingest path reads are modeled; everything else in the
//! Bot API payload is ignored during decoding.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Update {
  #[serde(default)]
  pub update_id: Option<i64>,
  #[serde(default)]
  pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
  #[serde(default)]
  pub message_id: Option<i64>,
  #[serde(default)]
  pub text: Option<String>,
  #[serde(default)]
  pub chat: Option<Chat>,
  #[serde(default)]
  pub from: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
  #[serde(default)]
  pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct User {
  #[serde(default)]
  pub id: Option<i64>,
  #[serde(default)]
  pub is_bot: bool,
  #[serde(default)]
  pub username: Option<String>,
}

impl Update {
  pub fn sender_username(&self) -> Option<&str> {
    self.sender().and_then(|u| u.username.as_deref())
  }

  pub fn chat_id(&self) -> Option<i64> {
    self
      .message
      .as_ref()
      .and_then(|m| m.chat.as_ref())
      .and_then(|c| c.id)
  }

  pub fn sender(&self) -> Option<&User> {
    self.message.as_ref().and_then(|m| m.from.as_ref())
  }

  pub fn text(&self) -> Option<&str> {
    self.message.as_ref().and_then(|m| m.text.as_deref())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_full_bot_api_message() {
    let raw = r#"{
      "update_id": 10,
      "message": {
        "message_id": 7,
        "date": 1700000000,
        "text": "hello",
        "chat": {"id": 42, "type": "private"},
        "from": {"id": 1, "is_bot": false, "first_name": "Alice", "username": "alice"}
      }
    }"#;
    let update: Update = serde_json::from_str(raw).unwrap();
    assert_eq!(update.sender_username(), Some("alice"));
    assert_eq!(update.text(), Some("hello"));
    assert_eq!(update.chat_id(), Some(42));
    let sender = update.sender().unwrap();
    assert_eq!(sender.id, Some(1));
    assert!(!sender.is_bot);
    assert_eq!(update.message.unwrap().message_id, Some(7));
  }

  #[test]
  fn non_message_updates_decode_without_sender() {
    let update: Update =
      serde_json::from_str(r#"{"update_id": 3, "edited_message": {"text": "x"}}"#).unwrap();
    assert!(update.message.is_none());
    assert_eq!(update.sender_username(), None);
    assert_eq!(update.text(), None);
  }

  #[test]
  fn chat_without_id_still_decodes() {
    let update: Update = serde_json::from_str(
      r#"{"message": {"text": "hi", "chat": {}, "from": {"username": "alice"}}}"#,
    )
    .unwrap();
    assert_eq!(update.chat_id(), None);
    assert_eq!(update.text(), Some("hi"));
  }

  #[test]
  fn wrong_field_types_fail_to_decode() {
    let res = serde_json::from_str::<Update>(r#"{"message": {"text": 5}}"#);
    assert!(res.is_err());
  }
}
