//! Error pages

use super::layout;

pub fn not_found() -> String {
    layout(
        "Not Found",
        None,
        r#"<h1>404</h1>
        <p>Sorry, the page you were looking for does not exist.</p>
        <p><a href="/">Back to home</a></p>"#,
    )
}

pub fn server_error() -> String {
    layout(
        "Server Error",
        None,
        r#"<h1>500</h1>
        <p>Something went wrong on our end. Please try again later.</p>
        <p><a href="/">Back to home</a></p>"#,
    )
}
