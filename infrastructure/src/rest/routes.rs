//! REST API routes used for interaction replies.

use relay_domain::Snowflake;

/// `POST` the initial interaction callback.
pub fn interaction_callback(interaction_id: Snowflake, token: &str) -> String {
    format!("/interactions/{}/{}/callback", interaction_id, token)
}

/// `GET`/`PATCH`/`DELETE` the initial reply message.
pub fn original_response(application_id: Snowflake, token: &str) -> String {
    format!("/webhooks/{}/{}/messages/@original", application_id, token)
}

/// `POST` a follow-up message.
pub fn followups(application_id: Snowflake, token: &str) -> String {
    format!("/webhooks/{}/{}", application_id, token)
}

/// `GET`/`PATCH`/`DELETE` one follow-up message.
pub fn followup(application_id: Snowflake, token: &str, message_id: Snowflake) -> String {
    format!("/webhooks/{}/{}/messages/{}", application_id, token, message_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_keyed_as_expected() {
        assert_eq!(
            interaction_callback(Snowflake(1), "abc"),
            "/interactions/1/abc/callback"
        );
        assert_eq!(
            original_response(Snowflake(2), "abc"),
            "/webhooks/2/abc/messages/@original"
        );
        assert_eq!(followups(Snowflake(2), "abc"), "/webhooks/2/abc");
        assert_eq!(
            followup(Snowflake(2), "abc", Snowflake(3)),
            "/webhooks/2/abc/messages/3"
        );
    }
}
