//! The slice of `onnx.proto` (IR version 8) needed to describe a
//! feed-forward graph with float initializers. Field tags match the
//! upstream schema, so any ONNX runtime can decode the result.

/// `TensorProto.DataType.FLOAT`
pub const DATA_TYPE_FLOAT: i32 = 1;
/// `TensorProto.DataType.INT64`
pub const DATA_TYPE_INT64: i32 = 7;

/// IR version that goes with opset 17.
pub const IR_VERSION: i64 = 8;
pub const OPSET_VERSION: i64 = 17;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModelProto {
    #[prost(int64, tag="1")]
    pub ir_version: i64,
    #[prost(string, tag="2")]
    pub producer_name: ::prost::alloc::string::String,
    #[prost(string, tag="3")]
    pub producer_version: ::prost::alloc::string::String,
    #[prost(string, tag="6")]
    pub doc_string: ::prost::alloc::string::String,
    #[prost(message, optional, tag="7")]
    pub graph: ::core::option::Option<GraphProto>,
    #[prost(message, repeated, tag="8")]
    pub opset_import: ::prost::alloc::vec::Vec<OperatorSetIdProto>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OperatorSetIdProto {
    /// Empty string means the default `ai.onnx` domain.
    #[prost(string, tag="1")]
    pub domain: ::prost::alloc::string::String,
    #[prost(int64, tag="2")]
    pub version: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GraphProto {
    #[prost(message, repeated, tag="1")]
    pub node: ::prost::alloc::vec::Vec<NodeProto>,
    #[prost(string, tag="2")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag="5")]
    pub initializer: ::prost::alloc::vec::Vec<TensorProto>,
    #[prost(message, repeated, tag="11")]
    pub input: ::prost::alloc::vec::Vec<ValueInfoProto>,
    #[prost(message, repeated, tag="12")]
    pub output: ::prost::alloc::vec::Vec<ValueInfoProto>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeProto {
    #[prost(string, repeated, tag="1")]
    pub input: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag="2")]
    pub output: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag="3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag="4")]
    pub op_type: ::prost::alloc::string::String,
    #[prost(message, repeated, tag="5")]
    pub attribute: ::prost::alloc::vec::Vec<AttributeProto>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AttributeProto {
    #[prost(string, tag="1")]
    pub name: ::prost::alloc::string::String,
    #[prost(int64, tag="3")]
    pub i: i64,
    #[prost(int64, repeated, tag="8")]
    pub ints: ::prost::alloc::vec::Vec<i64>,
    #[prost(enumeration="AttributeType", tag="20")]
    pub r#type: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum AttributeType {
    Undefined = 0,
    Float = 1,
    Int = 2,
    String = 3,
    Tensor = 4,
    Graph = 5,
    Floats = 6,
    Ints = 7,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TensorProto {
    #[prost(int64, repeated, tag="1")]
    pub dims: ::prost::alloc::vec::Vec<i64>,
    #[prost(int32, tag="2")]
    pub data_type: i32,
    #[prost(float, repeated, tag="4")]
    pub float_data: ::prost::alloc::vec::Vec<f32>,
    #[prost(int64, repeated, tag="7")]
    pub int64_data: ::prost::alloc::vec::Vec<i64>,
    #[prost(string, tag="8")]
    pub name: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValueInfoProto {
    #[prost(string, tag="1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, optional, tag="2")]
    pub r#type: ::core::option::Option<TypeProto>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TypeProto {
    /// Only the `tensor_type` arm of the upstream oneof is used.
    #[prost(message, optional, tag="1")]
    pub tensor_type: ::core::option::Option<type_proto::Tensor>,
}

pub mod type_proto {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Tensor {
        #[prost(int32, tag="1")]
        pub elem_type: i32,
        #[prost(message, optional, tag="2")]
        pub shape: ::core::option::Option<super::TensorShapeProto>,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TensorShapeProto {
    #[prost(message, repeated, tag="1")]
    pub dim: ::prost::alloc::vec::Vec<tensor_shape_proto::Dimension>,
}

pub mod tensor_shape_proto {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Dimension {
        #[prost(oneof="dimension::Value", tags="1, 2")]
        pub value: ::core::option::Option<dimension::Value>,
    }

    pub mod dimension {
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Value {
            /// Fixed size
            #[prost(int64, tag="1")]
            DimValue(i64),
            /// Named symbolic size, left free for the runtime
            #[prost(string, tag="2")]
            DimParam(::prost::alloc::string::String),
        }
    }
}

// ─── Builders ─────────────────────────────────────────────────────────────────

impl AttributeProto {
    pub fn int(name: &str, value: i64) -> Self {
        Self {
            name: name.to_string(),
            i: value,
            r#type: AttributeType::Int as i32,
            ..Default::default()
        }
    }

    pub fn ints(name: &str, values: &[i64]) -> Self {
        Self {
            name: name.to_string(),
            ints: values.to_vec(),
            r#type: AttributeType::Ints as i32,
            ..Default::default()
        }
    }
}

impl NodeProto {
    pub fn new(op_type: &str, name: &str, inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            input: inputs.iter().map(|s| s.to_string()).collect(),
            output: outputs.iter().map(|s| s.to_string()).collect(),
            name: name.to_string(),
            op_type: op_type.to_string(),
            attribute: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeProto) -> Self {
        self.attribute.push(attribute);
        self
    }
}

impl TensorProto {
    pub fn float(name: &str, dims: &[usize], data: Vec<f32>) -> Self {
        Self {
            dims: dims.iter().map(|&d| d as i64).collect(),
            data_type: DATA_TYPE_FLOAT,
            float_data: data,
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn int64(name: &str, dims: &[usize], data: Vec<i64>) -> Self {
        Self {
            dims: dims.iter().map(|&d| d as i64).collect(),
            data_type: DATA_TYPE_INT64,
            int64_data: data,
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Element count implied by `dims`.
    pub fn numel(&self) -> usize {
        self.dims.iter().product::<i64>() as usize
    }
}

/// One axis of a graph input/output.
#[derive(Debug, Clone, PartialEq)]
pub enum Dim {
    Fixed(usize),
    Symbolic(String),
}

impl ValueInfoProto {
    pub fn tensor(name: &str, elem_type: i32, dims: &[Dim]) -> Self {
        use tensor_shape_proto::{dimension::Value, Dimension};

        let dim = dims
            .iter()
            .map(|d| Dimension {
                value: Some(match d {
                    Dim::Fixed(n)    => Value::DimValue(*n as i64),
                    Dim::Symbolic(s) => Value::DimParam(s.clone()),
                }),
            })
            .collect();

        Self {
            name: name.to_string(),
            r#type: Some(TypeProto {
                tensor_type: Some(type_proto::Tensor {
                    elem_type,
                    shape: Some(TensorShapeProto { dim }),
                }),
            }),
        }
    }

    /// The declared axes, symbolic ones by name.
    pub fn dims(&self) -> Vec<Dim> {
        use tensor_shape_proto::dimension::Value;

        self.r#type
            .as_ref()
            .and_then(|t| t.tensor_type.as_ref())
            .and_then(|t| t.shape.as_ref())
            .map(|shape| {
                shape
                    .dim
                    .iter()
                    .filter_map(|d| match &d.value {
                        Some(Value::DimValue(n)) => Some(Dim::Fixed(*n as usize)),
                        Some(Value::DimParam(s)) => Some(Dim::Symbolic(s.clone())),
                        None => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
