use std::sync::Arc;

use cms_http::CrudService;
use cms_kernel::{ContentResource, UserResource};
use serde::Serialize;

/// Headline counts. `None` means the count could not be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub users: Option<usize>,
    pub published: Option<usize>,
    pub drafts: Option<usize>,
}

pub struct Dashboard {
    users: Arc<dyn CrudService<UserResource>>,
    content: Arc<dyn CrudService<ContentResource>>,
}

impl Dashboard {
    pub fn new(
        users: Arc<dyn CrudService<UserResource>>,
        content: Arc<dyn CrudService<ContentResource>>,
    ) -> Self {
        Self { users, content }
    }

    pub async fn load(&self) -> DashboardStats {
        let (users, content) = tokio::join!(self.users.list(None), self.content.list(None));

        let users = users
            .map(|users| users.len())
            .map_err(|err| tracing::warn!(error = %err, "user count unavailable"))
            .ok();
        let (published, drafts) = match content {
            Ok(items) => (
                Some(items.iter().filter(|c| c.is_published()).count()),
                Some(items.iter().filter(|c| c.is_draft()).count()),
            ),
            Err(err) => {
                tracing::warn!(error = %err, "content counts unavailable");
                (None, None)
            }
        };

        DashboardStats {
            users,
            published,
            drafts,
        }
    }
}
