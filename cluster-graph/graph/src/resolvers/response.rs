use parking_lot::Mutex;
use std::sync::Arc;

/// An error scoped to a single field of a single query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// The response path of the field that failed, e.g.
    /// `managedResource.definition`.
    pub path: String,
    pub message: String,
}

/// The per-query error log.
///
/// Resolvers append to it instead of returning errors to the engine, so one
/// field's failure never aborts its siblings. The server merges the
/// accumulated list into the response after execution; the caller always
/// receives whatever data resolved alongside the full error list.
///
/// Handles are cheap clones of shared state. Appends from concurrently
/// resolving fields are serialized; their order is completion order.
#[derive(Clone, Debug, Default)]
pub struct ResponseContext {
    errors: Arc<Mutex<Vec<FieldError>>>,
}

// === impl ResponseContext ===

impl ResponseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.lock().push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    /// A snapshot of the errors accumulated so far, in append order.
    pub fn errors(&self) -> Vec<FieldError> {
        self.errors.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order_without_deduplication() {
        let rsp = ResponseContext::new();
        rsp.add_error("a.b", "boom");
        rsp.add_error("a.c", "boom");
        rsp.add_error("a.b", "boom");

        let errors = rsp.errors();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].path, "a.b");
        assert_eq!(errors[1].path, "a.c");
        assert_eq!(errors[2].path, "a.b");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_preserve_every_entry() {
        let rsp = ResponseContext::new();
        let tasks = (0..32)
            .map(|i| {
                let rsp = rsp.clone();
                tokio::spawn(async move {
                    rsp.add_error(format!("field{i}"), "boom");
                })
            })
            .collect::<Vec<_>>();
        for task in tasks {
            task.await.expect("append task");
        }
        assert_eq!(rsp.errors().len(), 32);
    }
}
