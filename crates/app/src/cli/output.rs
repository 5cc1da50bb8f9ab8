use std::{
    fmt::Display,
    io::{self, Write},
};

use revenge_app::{
    auth::{Screen, User},
    context::AppContext,
    domain::result::ActionFailure,
    views::pagination::Pagination,
};
use tabled::Table;

/// Write a block of output to stdout.
pub(crate) fn emit(text: impl Display) -> Result<(), String> {
    writeln!(io::stdout().lock(), "{text}").map_err(|error| format!("failed to write output: {error}"))
}

/// Run `write` against a locked stdout.
pub(crate) fn emit_with(
    write: impl FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>,
) -> Result<(), String> {
    write(&mut io::stdout().lock()).map_err(|error| format!("failed to write output: {error}"))
}

/// The logged-in user, if they may open `screen`.
pub(crate) fn authorize(context: &AppContext, screen: Screen) -> Result<User, String> {
    context
        .session
        .authorize(screen)
        .map_err(|denied| denied.to_string())
}

pub(crate) fn failed(action: &str) -> impl FnOnce(ActionFailure) -> String {
    move |failure| format!("{action}: {failure}")
}

/// One page of `items` as a table, with the page position under it.
pub(crate) fn emit_page<T>(
    items: &[T],
    page: usize,
    page_size: usize,
    table: impl FnOnce(&[T]) -> Table,
) -> Result<(), String> {
    if items.is_empty() {
        return emit("(sin resultados)");
    }

    let mut pagination = Pagination::new(items.len());

    if !pagination.set_page_size(page_size) {
        return Err(format!("page size must be one of 10, 25, 50 or 100, got {page_size}"));
    }

    pagination.go_to(page);

    emit(format!(
        "{}\nPágina {} de {} ({})",
        table(pagination.page_items(items)),
        pagination.page(),
        pagination.total_pages(),
        pagination.range_label()
    ))
}
