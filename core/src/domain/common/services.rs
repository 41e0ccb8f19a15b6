use std::sync::Arc;

use crate::domain::food_recognition::{ports::InferenceClient, value_objects::RecognitionContext};

/// Application service: the inference backend plus the read-only recognition
/// context. Cloning is cheap, both halves are shared.
pub struct Service<I>
where
    I: InferenceClient,
{
    pub(crate) inference_client: Arc<I>,
    pub(crate) context: Arc<RecognitionContext>,
}

impl<I> Service<I>
where
    I: InferenceClient,
{
    pub fn new(inference_client: I, context: RecognitionContext) -> Self {
        Self {
            inference_client: Arc::new(inference_client),
            context: Arc::new(context),
        }
    }

    pub fn inference_client(&self) -> &I {
        &self.inference_client
    }
}

impl<I> Clone for Service<I>
where
    I: InferenceClient,
{
    fn clone(&self) -> Self {
        Self {
            inference_client: Arc::clone(&self.inference_client),
            context: Arc::clone(&self.context),
        }
    }
}
