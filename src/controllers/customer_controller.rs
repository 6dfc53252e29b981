use validator::Validate;

use crate::dto::customer_dto::{
    CreateCustomerRequest, ImportReport, ImportRowsRequest, SummaryResponse, UpdateCustomerRequest,
};
use crate::dto::ApiResponse;
use crate::models::customer::CustomerRecord;
use crate::repositories::DataRepository;
use crate::services::customer_service;
use crate::utils::errors::AppError;

pub struct CustomerController {
    repository: DataRepository,
}

impl CustomerController {
    pub fn new(repository: DataRepository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<CustomerRecord>>, AppError> {
        let customers = self.repository.customers().await?;
        Ok(ApiResponse::success(customers))
    }

    pub async fn import(&self, request: ImportRowsRequest) -> Result<ApiResponse<ImportReport>, AppError> {
        let report = customer_service::import_rows(&self.repository, &request.rows).await?;
        let message = format!(
            "{} clientes importados (filas de origen: {}, tras agrupar por dirección: {})",
            report.grouped_count, report.source_count, report.grouped_count
        );
        Ok(ApiResponse::success_with_message(report, message))
    }

    pub async fn create(&self, request: CreateCustomerRequest) -> Result<ApiResponse<CustomerRecord>, AppError> {
        request.validate()?;

        let customer = customer_service::add_customer(&self.repository, request.into()).await?;
        Ok(ApiResponse::success_with_message(
            customer,
            "Cliente creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateCustomerRequest,
    ) -> Result<ApiResponse<CustomerRecord>, AppError> {
        request.validate()?;

        let customer = customer_service::update_customer(&self.repository, id, request).await?;
        Ok(ApiResponse::success(customer))
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse<String>, AppError> {
        customer_service::delete_customer(&self.repository, id).await?;
        Ok(ApiResponse::success_with_message(
            id.to_string(),
            "Cliente eliminado exitosamente".to_string(),
        ))
    }

    pub async fn summary(&self) -> Result<ApiResponse<SummaryResponse>, AppError> {
        let summary = customer_service::summary(&self.repository).await?;
        Ok(ApiResponse::success(summary))
    }
}
