use pitch_duel::rocket_initialize;

#[rocket::main]
async fn main() {
    if let Err(e) = rocket_initialize().launch().await {
        eprintln!("server stopped: {e}");
    }
}
