use eyre::Result;
use table_booking_core::{ReservationForm, Table};
use table_booking_tests::TestCtxBuilder;
use util::{alice, ids, reserve};

mod util;

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_cancel_reservation() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;
    reserve(&ctx, 3, &alice()).await?;
    reserve(&ctx, 9, &alice()).await?;

    let response = ctx.api.cancel(3).await?.result?;
    assert_eq!(
        response.message,
        "❌ Reservation for Table 3 by Alice has been cancelled."
    );
    assert_eq!(
        ids(&response.tables),
        (1..=10).collect::<Vec<_>>(),
        "A cancellation answers with every table."
    );
    assert_eq!(response.tables[2], Table::new(3));
    assert!(response.tables[8].is_reserved, "Table 9 must stay reserved.");
    assert_eq!(response.tables, ctx.snapshot());

    ctx.finish().await;
    Ok(())
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_cancel_available_table() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;

    let message = ctx.api.cancel(6).await?.expect_err(400);
    assert_eq!(message, "This table is not currently reserved.");

    reserve(&ctx, 6, &alice()).await?;
    ctx.api.cancel(6).await?.result?;
    let message = ctx.api.cancel(6).await?.expect_err(400);
    assert_eq!(message, "This table is not currently reserved.");
    assert_eq!(ctx.api.get_table(6).await?.result?, Table::new(6));

    ctx.finish().await;
    Ok(())
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_cancel_unknown_table() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;

    for id in [0, 11] {
        let message = ctx.api.cancel(id).await?.expect_err(404);
        assert_eq!(message, "Table not found");
    }

    ctx.finish().await;
    Ok(())
}

#[tokio::test]
#[ntest::timeout(10_000)]
async fn test_reserve_cancel_round_trip() -> Result<()> {
    let ctx = TestCtxBuilder::new().build().await?;
    let initial = ctx.api.list_tables().await?.result?;

    for id in 1..=10 {
        let form = ReservationForm::new(format!("Guest {id}"), "2024-12-24", "19:30");
        reserve(&ctx, id, &form).await?;
        let response = ctx.api.cancel(id).await?.result?;
        assert_eq!(
            response.message,
            format!("❌ Reservation for Table {id} by Guest {id} has been cancelled.")
        );
        assert_eq!(ctx.api.get_table(id).await?.result?, Table::new(id));
    }
    assert_eq!(ctx.api.list_tables().await?.result?, initial);

    // A cancelled table can be booked again
    let table = reserve(&ctx, 1, &alice()).await?;
    assert_eq!(table.customer_name, "Alice");

    ctx.finish().await;
    Ok(())
}
