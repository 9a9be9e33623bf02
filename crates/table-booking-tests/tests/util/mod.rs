use eyre::Result;
use table_booking_core::{ReservationForm, Table, TableId};
use table_booking_tests::{Api, TestCtx};

/// A complete reservation for Alice
#[allow(unused)]
pub fn alice() -> ReservationForm {
    ReservationForm::new("Alice", "2024-01-01", "18:00")
}

/// Reserves table `id` and checks that the reservation succeeded.
#[allow(unused)]
pub async fn reserve(ctx: &TestCtx, id: TableId, form: &ReservationForm) -> Result<Table> {
    let response = ctx.api.reserve(id, form).await?;
    assert_eq!(
        response.status, 200,
        "It must be possible to reserve the available table {id}."
    );
    Ok(response.result?.table)
}

/// IDs of the given tables, in order
#[allow(unused)]
pub fn ids(tables: &[Table]) -> Vec<TableId> {
    tables.iter().map(|table| table.id).collect()
}

/// Clones of `api` spread round-robin over all worker threads
///
/// Every clone must be dropped before `ctx.finish()`.
#[allow(unused)]
pub fn spread(api: &Api, count: usize) -> Vec<Api> {
    std::iter::successors(Some(api.clone()), |api| Some(api.clone()))
        .take(count)
        .collect()
}
