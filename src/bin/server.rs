#[tokio::main]
async fn main() {
    class_booking::run().await;
}
