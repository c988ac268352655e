#[actix_web::main]
async fn main() {
    if let Err(err) = mall_feedback_lib::run().await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
