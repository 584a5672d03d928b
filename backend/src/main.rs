#![deny(clippy::all)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]

#[tokio::main]
async fn main() {
    taproom::app::run().await;
}
