use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use arrow::compute::concat_batches;
use arrow::datatypes::{Field, SchemaRef};
use datafusion::prelude::{DataFrame, SessionContext};

use crate::error::XrChartError;

/// An in-memory table held as a single record batch
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    batch: RecordBatch,
}

impl DataTable {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    pub fn field(&self, name: &str) -> Result<&Field, XrChartError> {
        self.batch
            .schema_ref()
            .field_with_name(name)
            .map_err(|_| XrChartError::FieldNotFound(name.to_string()))
    }

    pub fn column(&self, name: &str) -> Result<&ArrayRef, XrChartError> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| XrChartError::FieldNotFound(name.to_string()))
    }

    pub fn to_dataframe(&self, ctx: &SessionContext) -> Result<DataFrame, XrChartError> {
        Ok(ctx.read_batch(self.batch.clone())?)
    }

    pub async fn from_dataframe(df: DataFrame) -> Result<Self, XrChartError> {
        let schema = df.schema().inner().clone();
        let batches = df.collect().await?;
        Ok(Self::new(concat_batches(&schema, &batches)?))
    }
}
