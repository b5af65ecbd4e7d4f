use axum::response::Html;
use axum_extra::extract::CookieJar;

use crate::http_server::{flash::Flash, pages};

pub async fn index(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = Flash::take(jar);
    (jar, Html(pages::home::home(flash.as_ref())))
}
