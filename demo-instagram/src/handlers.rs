pub(crate) async fn health() -> &'static str {
    "Server is healthy"
}
