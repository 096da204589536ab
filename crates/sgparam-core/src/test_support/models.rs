use crate::{
    error::Error,
    object::{FactoryBuilder, ObjectFactory},
    prelude::*,
};
use std::{cell::Cell, rc::Rc};

///
/// GaussianKernel
///
/// Two plain scalars and a hook counter.
///

pub(crate) struct GaussianKernel {
    params: Parameters,
    pub(crate) width: Param<f64>,
    pub(crate) cache_size: Param<i32>,
    pub(crate) loads: Cell<u32>,
}

impl GaussianKernel {
    pub(crate) fn new(width: f64) -> Self {
        let mut params = Parameters::new();
        let width = params.add("width", width, "kernel width").expect("width");
        let cache_size = params
            .add("cache_size", 10i32, "cache size in MB")
            .expect("cache_size");

        Self {
            params,
            width,
            cache_size,
            loads: Cell::new(0),
        }
    }
}

impl SgObject for GaussianKernel {
    fn name(&self) -> &str {
        "GaussianKernel"
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn load_serializable_post(&self) -> Result<(), Error> {
        self.loads.set(self.loads.get() + 1);
        Ok(())
    }
}

///
/// Machine
///
/// One field of every structure, plus a nested kernel.
///

pub(crate) struct Machine {
    params: Parameters,
    pub(crate) kernel: Param<Option<ObjectRef>>,
    pub(crate) labels: Param<SgVector<f64>>,
    pub(crate) weights: Param<SgMatrix<f32>>,
    pub(crate) title: Param<SgString<Char>>,
    pub(crate) features: Param<SgVector<SgSparseVector<f64>>>,
    pub(crate) bias: Param<FloatMax>,
}

impl Machine {
    pub(crate) fn new() -> Self {
        let mut params = Parameters::new();
        let kernel = params
            .add::<Option<ObjectRef>>("kernel", None, "")
            .expect("kernel");
        let labels = params
            .add_vector::<f64>("labels", Vec::new(), "training labels")
            .expect("labels");
        let weights = params
            .add_matrix::<f32>("weights", 0, 0, Vec::new(), "weight matrix")
            .expect("weights");
        let title = params
            .add("title", SgString::<Char>::default(), "display title")
            .expect("title");
        let features = params
            .add(
                "features",
                SgVector::<SgSparseVector<f64>>::default(),
                "sparse training features",
            )
            .expect("features");
        let bias = params
            .add("bias", FloatMax(0.0), "bias term")
            .expect("bias");

        Self {
            params,
            kernel,
            labels,
            weights,
            title,
            features,
            bias,
        }
    }

    pub(crate) fn with_kernel(kernel: ObjectRef) -> Self {
        let machine = Self::new();
        machine.kernel.set(Some(kernel));

        machine
    }

    /// Machine holding example data in every field.
    pub(crate) fn populated() -> Self {
        let machine = Self::with_kernel(Rc::new(GaussianKernel::new(2.5)));
        machine.labels.set(SgVector(vec![1.0, -1.0, 1.0]));
        machine.weights.set(
            SgMatrix::new(2, 3, vec![0.5, 1.5, 2.5, 3.5, 4.5, 5.5]).expect("shape"),
        );
        machine.title.set(SgString::from("svm"));
        machine.features.set(SgVector(vec![
            SgSparseVector::from_pairs(0, [(1, 0.25), (4, 2.0)]),
            SgSparseVector::from_pairs(1, []),
            SgSparseVector::from_pairs(2, [(0, -1.0)]),
        ]));
        machine.bias.set(FloatMax(0.125));

        machine
    }
}

impl SgObject for Machine {
    fn name(&self) -> &str {
        "Machine"
    }

    fn generic(&self) -> Option<PrimitiveType> {
        Some(PrimitiveType::Float64)
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }
}

///
/// Node
///
/// Linked node for building shared and cyclic graphs.
///

pub(crate) struct Node {
    params: Parameters,
    pub(crate) value: Param<i32>,
    pub(crate) next: Param<Option<ObjectRef>>,
}

impl Node {
    pub(crate) fn new(value: i32) -> Rc<Self> {
        let mut params = Parameters::new();
        let value = params.add("value", value, "").expect("value");
        let next = params
            .add::<Option<ObjectRef>>("next", None, "")
            .expect("next");

        Rc::new(Self {
            params,
            value,
            next,
        })
    }
}

impl SgObject for Node {
    fn name(&self) -> &str {
        "Node"
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }
}

/// Factory that knows every test model.
pub(crate) fn factory() -> ObjectFactory {
    FactoryBuilder::new()
        .register("GaussianKernel", || Rc::new(GaussianKernel::new(1.0)))
        .and_then(|b| {
            b.register_generic("Machine", PrimitiveType::Float64, || Rc::new(Machine::new()))
        })
        .and_then(|b| b.register("Node", || Node::new(0)))
        .expect("test factory")
        .build()
}
