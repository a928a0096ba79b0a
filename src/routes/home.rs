use crate::{Request, Response};

pub const WELCOME_MESSAGE: &str = "Hello everyone. We extend a warm welcome to all of you to \
    SubSpace App. To gain insight into the functionality of our application, please navigate \
    to the '/api/blog-stats' route. Furthermore, for conducting searches based on specific \
    queries within the data displayed in the aforementioned route, please proceed to the \
    '/api/blog-search' route.";

/// `GET /`
pub async fn welcome(_req: Request) -> Response {
    Response::text(WELCOME_MESSAGE)
}
