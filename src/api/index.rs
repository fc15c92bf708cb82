use actix_web::{HttpResponse, Responder, get, web};

#[get("/")]
async fn welcome() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(r#"<h1 style="color:blue;text-align:center">Welcome to Intelligent Job Matching System!</h1>"#)
}

pub fn index_config(config: &mut web::ServiceConfig) {
    config.service(welcome);
}
