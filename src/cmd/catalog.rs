use crate::reports;
use fengshui::catalog::ObjectCatalog;
use fengshui::error::FsResult;

pub fn run(catalog: &ObjectCatalog) -> FsResult<()> {
    reports::print_catalog(catalog);
    Ok(())
}
