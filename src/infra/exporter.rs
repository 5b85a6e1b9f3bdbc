// ============================================================
// Layer 6: ONNX Exporter
// ============================================================
// Writes the fitted model as a two-file artifact for inference
// outside this binary (the browser extension runs it with
// onnxruntime-web):
//
//   personal_lstm.onnx  → graph + weights, opset 17
//   personal_lstm.json  → character → code table
//
// Graph (batch fixed at 1, "seq" left symbolic):
//
//   input  int64 [1, seq]
//     Gather(embedding)          → [1, seq, 64]
//     Transpose(1,0,2)           → [seq, 1, 64]
//     LSTM → Squeeze(axis 1)     → [seq, 1, 128]   (layer 0)
//     LSTM → Squeeze(axis 1)     → [seq, 1, 128]   (layer 1)
//     Transpose(1,0,2)           → [1, seq, 128]
//     MatMul(W) → Add(b)         → [1, seq, vocab]
//   output float [1, seq, vocab]
//
// Burn keeps one Linear per gate with weight [d_in, d_out];
// ONNX LSTM wants the four gates stacked in i, o, f, c order as
// [4·hidden, d_in], plus one bias row [Wb_iofc, Rb_iofc].
//
// Before writing, the model runs once on a random max_len input
// and the output shape is checked against the declared one.
//
// Reference: ONNX operator docs (LSTM, Gather, Squeeze-13)
//            prost documentation

use std::path::{Path, PathBuf};

use burn::{nn::Linear, prelude::*};
use prost::Message;
use rand::Rng;

use crate::domain::{error::PassError, rng::RngContext, vocabulary::Vocabulary};
use crate::infra::onnx::{
    AttributeProto, Dim, GraphProto, ModelProto, NodeProto, OperatorSetIdProto,
    TensorProto, ValueInfoProto, DATA_TYPE_FLOAT, DATA_TYPE_INT64, IR_VERSION, OPSET_VERSION,
};
use crate::infra::write_atomic;
use crate::ml::model::{PasswordLstm, HIDDEN_DIM};

pub const INPUT_NAME:  &str = "input";
pub const OUTPUT_NAME: &str = "output";
/// Symbolic name of the sequence-length axis in input and output.
pub const SEQ_AXIS:    &str = "seq";

/// Where the vocabulary sidecar goes for a given graph path.
pub fn sidecar_path(graph_path: &Path) -> PathBuf {
    graph_path.with_extension("json")
}

pub struct OnnxExporter<'a> {
    vocab:   &'a Vocabulary,
    max_len: usize,
    rng:     RngContext,
}

impl<'a> OnnxExporter<'a> {
    pub fn new(vocab: &'a Vocabulary, max_len: usize, rng: RngContext) -> Self {
        Self { vocab, max_len, rng }
    }

    /// Trace `model`, then write the graph to `path` and the vocabulary
    /// next to it. Returns the sidecar path once both files exist.
    pub fn export<B: Backend>(&self, model: &PasswordLstm<B>, path: &Path) -> Result<PathBuf, PassError> {
        let sidecar = sidecar_path(path);
        if sidecar == path {
            return Err(PassError::export(path, "graph path must not end in .json, the vocabulary sidecar would overwrite it"));
        }
        if model.vocab_size() != self.vocab.size() {
            return Err(PassError::export(
                path,
                format!("model has {} output codes, vocabulary has {}", model.vocab_size(), self.vocab.size()),
            ));
        }

        self.trace(model, path)?;
        let graph = self.build_graph(model).map_err(|reason| PassError::export(path, reason))?;
        let onnx  = ModelProto {
            ir_version:       IR_VERSION,
            producer_name:    env!("CARGO_PKG_NAME").to_string(),
            producer_version: env!("CARGO_PKG_VERSION").to_string(),
            doc_string:       "Character LSTM fitted to one user's passwords".to_string(),
            graph:            Some(graph),
            opset_import:     vec![OperatorSetIdProto { domain: String::new(), version: OPSET_VERSION }],
        };

        let vocab_json = serde_json::to_vec(self.vocab)
            .map_err(|e| PassError::export(&sidecar, e))?;

        write_atomic(path, &onnx.encode_to_vec()).map_err(|e| PassError::export(path, e))?;
        write_atomic(&sidecar, &vocab_json).map_err(|e| PassError::export(&sidecar, e))?;

        tracing::info!("ONNX graph written to '{}'", path.display());
        tracing::info!("Vocabulary written to '{}'", sidecar.display());
        Ok(sidecar)
    }

    /// Run the model once on a synthetic max_len sequence and check the result shape.
    fn trace<B: Backend>(&self, model: &PasswordLstm<B>, path: &Path) -> Result<(), PassError> {
        let vocab_size = self.vocab.size();
        let mut rng    = self.rng.trace_rng();
        let codes: Vec<i32> = (0..self.max_len)
            .map(|_| rng.gen_range(1..vocab_size as i32))
            .collect();

        let device = model.embedding.weight.val().device();
        let input  = Tensor::<B, 1, Int>::from_ints(codes.as_slice(), &device)
            .reshape([1, self.max_len]);

        let dims = model.forward(input).dims();
        if dims != [1, self.max_len, vocab_size] {
            return Err(PassError::export(
                path,
                format!("trace produced shape {dims:?}, expected [1, {}, {vocab_size}]", self.max_len),
            ));
        }
        tracing::debug!("Traced forward pass with output shape {:?}", dims);
        Ok(())
    }

    fn build_graph<B: Backend>(&self, model: &PasswordLstm<B>) -> Result<GraphProto, String> {
        let vocab_size = self.vocab.size();
        let embed_dim  = model.embedding.weight.val().dims()[1];

        let mut nodes        = Vec::new();
        let mut initializers = Vec::new();

        // ── Embedding lookup ──────────────────────────────────────────────────
        initializers.push(TensorProto::float(
            "embedding.weight",
            &[vocab_size, embed_dim],
            values(model.embedding.weight.val())?,
        ));
        nodes.push(
            NodeProto::new("Gather", "embedding", &["embedding.weight", INPUT_NAME], &["embedded"])
                .with_attribute(AttributeProto::int("axis", 0)),
        );
        nodes.push(
            NodeProto::new("Transpose", "to_time_major", &["embedded"], &["layer_in_0"])
                .with_attribute(AttributeProto::ints("perm", &[1, 0, 2])),
        );

        // Squeeze-13 takes its axes as a tensor input
        initializers.push(TensorProto::int64("squeeze_axes", &[1], vec![1]));

        // ── Stacked LSTM layers ───────────────────────────────────────────────
        let mut layer_in = "layer_in_0".to_string();
        for (i, lstm) in model.layers.iter().enumerate() {
            let d_input = lstm.input_gate.input_transform.weight.val().dims()[0];
            // ONNX gate order: input, output, forget, cell
            let gates = [&lstm.input_gate, &lstm.output_gate, &lstm.forget_gate, &lstm.cell_gate];

            let mut w    = Vec::with_capacity(4 * HIDDEN_DIM * d_input);
            let mut r    = Vec::with_capacity(4 * HIDDEN_DIM * HIDDEN_DIM);
            let mut w_b  = Vec::with_capacity(4 * HIDDEN_DIM);
            let mut r_b  = Vec::with_capacity(4 * HIDDEN_DIM);
            for gate in gates {
                w.extend(transposed(&gate.input_transform)?);
                r.extend(transposed(&gate.hidden_transform)?);
                w_b.extend(bias(&gate.input_transform)?);
                r_b.extend(bias(&gate.hidden_transform)?);
            }
            w_b.extend(r_b);

            let (w_name, r_name, b_name) = (format!("lstm{i}.W"), format!("lstm{i}.R"), format!("lstm{i}.B"));
            initializers.push(TensorProto::float(&w_name, &[1, 4 * HIDDEN_DIM, d_input], w));
            initializers.push(TensorProto::float(&r_name, &[1, 4 * HIDDEN_DIM, HIDDEN_DIM], r));
            initializers.push(TensorProto::float(&b_name, &[1, 8 * HIDDEN_DIM], w_b));

            // Y: [seq, num_directions = 1, batch, hidden]
            let y        = format!("lstm{i}.Y");
            let layer_out = format!("layer_in_{}", i + 1);
            nodes.push(
                NodeProto::new("LSTM", &format!("lstm{i}"), &[&layer_in, &w_name, &r_name, &b_name], &[&y])
                    .with_attribute(AttributeProto::int("hidden_size", HIDDEN_DIM as i64)),
            );
            nodes.push(NodeProto::new("Squeeze", &format!("lstm{i}.squeeze"), &[&y, "squeeze_axes"], &[&layer_out]));
            layer_in = layer_out;
        }

        nodes.push(
            NodeProto::new("Transpose", "to_batch_major", &[&layer_in], &["hidden"])
                .with_attribute(AttributeProto::ints("perm", &[1, 0, 2])),
        );

        // ── Output projection ─────────────────────────────────────────────────
        // Burn's Linear weight is already [d_in, d_out], the MatMul layout
        initializers.push(TensorProto::float(
            "projection.weight",
            &[HIDDEN_DIM, vocab_size],
            values(model.projection.weight.val())?,
        ));
        initializers.push(TensorProto::float("projection.bias", &[vocab_size], bias(&model.projection)?));
        nodes.push(NodeProto::new("MatMul", "projection", &["hidden", "projection.weight"], &["logits"]));
        nodes.push(NodeProto::new("Add", "projection.bias_add", &["logits", "projection.bias"], &[OUTPUT_NAME]));

        for init in &initializers {
            let len = init.float_data.len().max(init.int64_data.len());
            if len != init.numel() {
                return Err(format!("initializer '{}' has {} values for dims {:?}", init.name, len, init.dims));
            }
        }

        Ok(GraphProto {
            node:        nodes,
            name:        "password_lstm".to_string(),
            initializer: initializers,
            input: vec![ValueInfoProto::tensor(
                INPUT_NAME,
                DATA_TYPE_INT64,
                &[Dim::Fixed(1), Dim::Symbolic(SEQ_AXIS.to_string())],
            )],
            output: vec![ValueInfoProto::tensor(
                OUTPUT_NAME,
                DATA_TYPE_FLOAT,
                &[Dim::Fixed(1), Dim::Symbolic(SEQ_AXIS.to_string()), Dim::Fixed(vocab_size)],
            )],
        })
    }
}

fn values<B: Backend, const D: usize>(tensor: Tensor<B, D>) -> Result<Vec<f32>, String> {
    tensor
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| format!("{e:?}"))
}

/// Weight of `linear` as [d_out, d_in], row-major.
fn transposed<B: Backend>(linear: &Linear<B>) -> Result<Vec<f32>, String> {
    values(linear.weight.val().transpose())
}

fn bias<B: Backend>(linear: &Linear<B>) -> Result<Vec<f32>, String> {
    match &linear.bias {
        Some(b) => values(b.val()),
        None    => Ok(vec![0.0; linear.weight.val().dims()[1]]),
    }
}
