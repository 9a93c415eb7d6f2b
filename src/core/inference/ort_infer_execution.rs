use super::*;
use crate::core::errors::SimpleError;
use ndarray::ArrayView2;
use ort::value::TensorRef;

impl OrtInfer {
    /// Returns the configured or discovered output tensor name.
    fn get_output_name(&self, session: &Session) -> Result<String, ClassifierError> {
        if let Some(ref name) = self.output_name {
            return Ok(name.clone());
        }
        session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| {
                ClassifierError::model_unavailable(
                    &self.model_path,
                    "model declares no outputs",
                    Some("the model may be invalid or corrupted"),
                    None::<SimpleError>,
                )
            })
    }

    /// Returns the model path associated with this inference engine.
    pub fn model_path(&self) -> &std::path::Path {
        &self.model_path
    }

    /// Returns the model name associated with this inference engine.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the name of the input tensor fed on every run.
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    fn run_inference_with_processor<T>(
        &self,
        x: &Tensor4D,
        processor: impl FnOnce(&[i64], &[f32]) -> Result<T, ClassifierError>,
    ) -> Result<T, ClassifierError> {
        let input_shape = x.shape().to_vec();

        let input_tensor = TensorRef::from_array_view(x.view()).map_err(|e| {
            ClassifierError::inference_error(
                &self.model_name,
                &format!("failed to convert input tensor with shape {:?}", input_shape),
                e,
            )
        })?;

        let mut session_guard = self.session.lock().map_err(|_| {
            ClassifierError::model_unavailable(
                &self.model_path,
                "session lock poisoned by an earlier failure",
                Some("reload the model"),
                None::<SimpleError>,
            )
        })?;

        let output_name = self.get_output_name(&session_guard)?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let outputs = session_guard.run(inputs).map_err(|e| {
            ClassifierError::inference_error(
                &self.model_name,
                &format!(
                    "forward pass failed with input '{}' {:?} -> output '{}'",
                    self.input_name, input_shape, output_name
                ),
                e,
            )
        })?;

        let (output_shape, output_data) = outputs[output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                ClassifierError::inference_error(
                    &self.model_name,
                    &format!("failed to extract output tensor '{}' as f32", output_name),
                    e,
                )
            })?;

        processor(output_shape, output_data)
    }

    /// Runs the model and reads back a `(batch_size, num_classes)` score tensor.
    pub fn infer_2d(&self, x: &Tensor4D) -> Result<Tensor2D, ClassifierError> {
        let batch_size = x.shape()[0];
        self.run_inference_with_processor(x, |output_shape, output_data| {
            if output_shape.len() != 2 {
                return Err(ClassifierError::shape_mismatch(
                    format!("output rank of model '{}'", self.model_name),
                    2,
                    output_shape.len(),
                ));
            }

            let batch_size_out = output_shape[0] as usize;
            if batch_size_out != batch_size {
                return Err(ClassifierError::shape_mismatch(
                    format!("output batch size of model '{}'", self.model_name),
                    batch_size,
                    batch_size_out,
                ));
            }

            let num_classes = output_shape[1] as usize;
            let expected_len = batch_size * num_classes;
            if output_data.len() != expected_len {
                return Err(ClassifierError::shape_mismatch(
                    format!("output data length of model '{}'", self.model_name),
                    expected_len,
                    output_data.len(),
                ));
            }

            let array_view = ArrayView2::from_shape((batch_size, num_classes), output_data)?;
            Ok(array_view.to_owned())
        })
    }
}
