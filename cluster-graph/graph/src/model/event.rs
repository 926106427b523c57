use super::ObjectMeta;
use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use cluster_graph_k8s_api as k8s;

/// An event recorded against a cluster object.
#[derive(Clone, Debug, SimpleObject)]
pub struct Event {
    pub metadata: ObjectMeta,
    #[graphql(name = "type")]
    pub type_: Option<String>,
    pub reason: Option<String>,
    pub message: Option<String>,
    pub count: Option<i32>,
    pub first_time: Option<DateTime<Utc>>,
    pub last_time: Option<DateTime<Utc>>,
}

// === impl Event ===

impl From<&k8s::Event> for Event {
    fn from(event: &k8s::Event) -> Self {
        Self {
            metadata: ObjectMeta::from(&event.metadata),
            type_: event.type_.clone(),
            reason: event.reason.clone(),
            message: event.message.clone(),
            count: event.count,
            first_time: event.first_timestamp.as_ref().map(|t| t.0),
            last_time: event.last_timestamp.as_ref().map(|t| t.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_an_event() {
        let event = k8s::Event {
            metadata: k8s::ObjectMeta {
                name: Some("cool.1".to_string()),
                namespace: Some("default".to_string()),
                ..Default::default()
            },
            type_: Some("Warning".to_string()),
            reason: Some("CannotConnect".to_string()),
            message: Some("cannot connect to provider".to_string()),
            count: Some(3),
            ..Default::default()
        };

        let got = Event::from(&event);
        assert_eq!(got.type_.as_deref(), Some("Warning"));
        assert_eq!(got.reason.as_deref(), Some("CannotConnect"));
        assert_eq!(got.count, Some(3));
        assert!(got.first_time.is_none());
    }
}
