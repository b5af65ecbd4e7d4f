use super::layout;

pub fn not_found() -> String {
    layout(
        "Not Found",
        None,
        r#"<h1>404 Not Found</h1>
        <p>The page you are looking for doesn't exist. <a href="/">Back to home</a></p>"#,
    )
}

pub fn server_error() -> String {
    layout(
        "Server Error",
        None,
        r#"<h1>500 Server Error</h1>
        <p>Something went wrong. Please try again later.</p>"#,
    )
}
