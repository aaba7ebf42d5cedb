use axum::Json;
use serde::Serialize;

/// The `{success, data}` wrapper every canonical response uses.
#[derive(Debug, Serialize)]
pub(crate) struct Envelope<T> {
    pub(crate) success: bool,
    pub(crate) data: T,
}

pub(crate) fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        success: true,
        data,
    })
}

/// Payload for write endpoints that report an outcome rather than a
/// record, e.g. updates and deletes.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub(crate) struct MessageBody {
    pub(crate) message: &'static str,
}

pub(crate) fn message(message: &'static str) -> Json<Envelope<MessageBody>> {
    ok(MessageBody { message })
}

#[cfg(test)]
mod tests {
    use super::{message, ok};

    #[test]
    fn success_envelope_has_the_expected_shape() {
        let json = serde_json::to_value(&ok(vec![1, 2, 3]).0).expect("must serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn message_envelope_wraps_the_outcome() {
        let json = serde_json::to_value(&message("user deleted").0).expect("must serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["message"], "user deleted");
    }
}
