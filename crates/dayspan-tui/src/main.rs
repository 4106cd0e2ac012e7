#[tokio::main]
async fn main() -> std::io::Result<()> {
    dayspan_tui::tui_main().await
}
