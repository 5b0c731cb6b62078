use anyhow::Result;

// Needs a server on :3000, e.g. `cargo run` in another terminal.
#[tokio::test]
#[ignore]
async fn quick_dev() -> Result<()> {
    let hc = httpc_test::new_client("http://localhost:3000")?;

    hc.do_get("/api/health").await?.print().await?;
    hc.do_get("/api/events?category=racing,social").await?.print().await?;
    hc.do_get("/api/events/upcoming?limit=3").await?.print().await?;
    hc.do_get("/api/events/commodores-cup/ics").await?.print().await?;
    hc.do_get("/api/photos?album=historical&order=asc").await?.print().await?;
    hc.do_get("/api/photos/albums").await?.print().await?;

    Ok(())
}
