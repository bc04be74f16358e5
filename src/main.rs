use forum_api::rocket as build_rocket;

#[rocket::launch]
fn rocket() -> _ {
    let rocket = build_rocket();
    log::info!("starting forum API server");
    rocket
}
