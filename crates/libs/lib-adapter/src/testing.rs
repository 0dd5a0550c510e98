//! Scripted capability double for unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use serde_json::Value;

use crate::capability::{Capability, Method};
use crate::error::ProviderFault;

pub(crate) type CallLog = Rc<RefCell<Vec<(&'static str, Method)>>>;

#[derive(Clone)]
enum Script {
    Resolve(Value),
    Reject(ProviderFault),
}

/// Capability whose methods resolve or reject as scripted and record every call.
pub(crate) struct ScriptedCapability {
    label: &'static str,
    methods: HashMap<Method, Script>,
    properties: HashMap<String, Value>,
    gates: RefCell<HashMap<Method, oneshot::Receiver<()>>>,
    calls: CallLog,
}

impl ScriptedCapability {
    pub(crate) fn new() -> Self {
        Self {
            label: "wallet",
            methods: HashMap::new(),
            properties: HashMap::new(),
            gates: RefCell::new(HashMap::new()),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Provider that already reports a connected session for `account`.
    pub(crate) fn connected(account: &str) -> Self {
        Self::new()
            .returns(Method::IsConnected, Value::Bool(true))
            .returns(Method::GetAccount, Value::String(account.to_string()))
    }

    pub(crate) fn labeled(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub(crate) fn returns(mut self, method: Method, value: Value) -> Self {
        self.methods.insert(method, Script::Resolve(value));
        self
    }

    pub(crate) fn rejects(mut self, method: Method, fault: ProviderFault) -> Self {
        self.methods.insert(method, Script::Reject(fault));
        self
    }

    pub(crate) fn property(mut self, name: &str, value: Value) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }

    /// Hold `method` pending until the returned sender fires (or is dropped).
    pub(crate) fn gated(self, method: Method) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(method, rx);
        (self, tx)
    }

    /// Record calls into a log shared with other doubles.
    pub(crate) fn logging_to(mut self, log: &CallLog) -> Self {
        self.calls = Rc::clone(log);
        self
    }

    pub(crate) fn call_log(&self) -> CallLog {
        Rc::clone(&self.calls)
    }
}

pub(crate) fn calls_of(log: &CallLog) -> Vec<(&'static str, Method)> {
    log.borrow().clone()
}

#[async_trait(?Send)]
impl Capability for ScriptedCapability {
    fn has_method(&self, method: Method) -> bool {
        self.methods.contains_key(&method)
    }

    async fn call(&self, method: Method) -> Result<Value, ProviderFault> {
        self.calls.borrow_mut().push((self.label, method));
        let gate = self.gates.borrow_mut().remove(&method);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match self.methods.get(&method) {
            Some(Script::Resolve(value)) => Ok(value.clone()),
            Some(Script::Reject(fault)) => Err(fault.clone()),
            None => Err(ProviderFault::new(format!("{} is not a function", method.js_name()))),
        }
    }

    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }
}
