use service::resource_service::{CommentService, DepartmentService, UserService};

/// Explicitly wired services, one per resource type, shared with every
/// handler through axum state.
#[derive(Clone)]
pub struct ServerState {
    pub comments: CommentService,
    pub users: UserService,
    pub departments: DepartmentService,
}
