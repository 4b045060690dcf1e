//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::row::{NewRow, Row, RowKind};
use crate::domain::types::RowId;
use crate::listing::result::ListResult;
use crate::listing::store::StoreQuery;
use crate::repository::errors::RepositoryResult;
use crate::repository::{RowReader, RowWriter};

mock! {
    pub Repository {}

    impl RowReader for Repository {
        fn get_row(&self, kind: RowKind, id: RowId) -> RepositoryResult<Option<Row>>;
        fn list_rows(&self, query: &StoreQuery) -> RepositoryResult<ListResult<Row>>;
        fn latest_featured(&self, kind: RowKind) -> RepositoryResult<Option<Row>>;
    }

    impl RowWriter for Repository {
        fn create_row(&self, row: &NewRow) -> RepositoryResult<Row>;
        fn update_row(&self, id: RowId, row: &NewRow) -> RepositoryResult<Row>;
        fn delete_row(&self, kind: RowKind, id: RowId) -> RepositoryResult<()>;
    }
}
