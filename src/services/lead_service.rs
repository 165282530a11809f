// src/services/lead_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    models::lead::{Lead, LeadPayload},
    services::notification::LeadNotifier,
};

#[derive(Clone)]
pub struct LeadService {
    notifier: Arc<dyn LeadNotifier>,
}

impl LeadService {
    pub fn new(notifier: Arc<dyn LeadNotifier>) -> Self {
        Self { notifier }
    }

    /// Valida o formulário e repassa o lead ao notificador.
    pub async fn submit(&self, payload: LeadPayload) -> Result<Lead, AppError> {
        let lead = payload.into_lead()?;
        self.notifier.notify(&lead).await?;
        Ok(lead)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Notificador de teste: guarda os leads recebidos, ou falha sob demanda.
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub received: Mutex<Vec<Lead>>,
        pub fail: bool,
    }

    #[async_trait]
    impl LeadNotifier for RecordingNotifier {
        async fn notify(&self, lead: &Lead) -> Result<(), AppError> {
            if self.fail {
                return Err(AppError::NotificationError("provedor fora do ar".into()));
            }
            self.received.lock().unwrap().push(lead.clone());
            Ok(())
        }
    }

    fn payload(json: &str) -> LeadPayload {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn valid_lead_reaches_the_notifier() {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = LeadService::new(notifier.clone());

        service
            .submit(payload(r#"{"imovel_id": 4, "nome": "Ana", "email": "ana@exemplo.com"}"#))
            .await
            .unwrap();

        let received = notifier.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].imovel_id, 4);
    }

    #[tokio::test]
    async fn invalid_lead_is_rejected_before_notifying() {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = LeadService::new(notifier.clone());

        let err = service.submit(payload(r#"{"nome": "Ana"}"#)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(notifier.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn notifier_failure_propagates() {
        let notifier = Arc::new(RecordingNotifier { fail: true, ..Default::default() });
        let service = LeadService::new(notifier);

        let err = service
            .submit(payload(r#"{"imovel_id": 4, "nome": "Ana", "email": "ana@exemplo.com"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotificationError(_)));
    }
}
