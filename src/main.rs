#[tokio::main]
async fn main() {
    restaurant_availability::run().await;
}
