//! Classification of raw source-chain messages.
//!
//! Transaction bodies carry messages as untyped JSON. Rather than probing
//! fields at every use site, each message is classified once into a
//! [`MessageKind`] and consumers go through its extractors.

use serde_json::Value;

/// One source-chain message, reduced to the shapes the translator cares
/// about.
#[derive(Debug, Clone)]
pub enum MessageKind {
    /// A Move entry-function execution (`MsgExecute` shape): names a module
    /// address, module name and function name.
    Execute {
        sender: Option<String>,
        module_address: String,
        module_name: String,
        function_name: String,
        type_args: Vec<String>,
        args: Vec<Value>,
    },
    /// Any other message that names a sender account.
    Signed { sender: String },
    /// Messages with neither a sender nor an execute shape.
    Other,
}

impl MessageKind {
    /// Classify one raw message.
    pub fn classify(message: &Value) -> Self {
        let sender = message
            .get("sender")
            .and_then(Value::as_str)
            .map(str::to_string);

        let module_address = message.get("module_address").and_then(Value::as_str);
        let module_name = message.get("module_name").and_then(Value::as_str);
        let function_name = message.get("function_name").and_then(Value::as_str);

        if let (Some(addr), Some(module), Some(function)) =
            (module_address, module_name, function_name)
        {
            let type_args = message
                .get("type_args")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            let args = message
                .get("args")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();

            return MessageKind::Execute {
                sender,
                module_address: addr.to_string(),
                module_name: module.to_string(),
                function_name: function.to_string(),
                type_args,
                args,
            };
        }

        match sender {
            Some(sender) => MessageKind::Signed { sender },
            None => MessageKind::Other,
        }
    }

    /// The sender account named by this message, if any.
    pub fn sender(&self) -> Option<&str> {
        match self {
            MessageKind::Execute { sender, .. } => sender.as_deref(),
            MessageKind::Signed { sender } => Some(sender),
            MessageKind::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_execute() {
        let msg = json!({
            "@type": "/initia.move.v1.MsgExecute",
            "sender": "init1YW5lcg==",
            "module_address": "0x1",
            "module_name": "coin",
            "function_name": "transfer",
            "type_args": ["0x1::native_uinit::Coin"],
            "args": ["AQID"]
        });

        match MessageKind::classify(&msg) {
            MessageKind::Execute {
                sender,
                module_address,
                module_name,
                function_name,
                type_args,
                args,
            } => {
                assert_eq!(sender.as_deref(), Some("init1YW5lcg=="));
                assert_eq!(module_address, "0x1");
                assert_eq!(module_name, "coin");
                assert_eq!(function_name, "transfer");
                assert_eq!(type_args, vec!["0x1::native_uinit::Coin"]);
                assert_eq!(args, vec![json!("AQID")]);
            }
            other => panic!("expected Execute, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_signed() {
        let msg = json!({
            "@type": "/cosmos.bank.v1beta1.MsgSend",
            "sender": "init1YW5lcg=="
        });
        let kind = MessageKind::classify(&msg);
        assert!(matches!(kind, MessageKind::Signed { .. }));
        assert_eq!(kind.sender(), Some("init1YW5lcg=="));
    }

    #[test]
    fn test_classify_other() {
        let msg = json!({ "@type": "/cosmos.gov.v1.MsgVote", "proposal_id": "7" });
        let kind = MessageKind::classify(&msg);
        assert!(matches!(kind, MessageKind::Other));
        assert_eq!(kind.sender(), None);
    }

    #[test]
    fn test_partial_execute_shape_falls_back_to_signed() {
        // module_name alone is not enough to qualify as an execute message.
        let msg = json!({ "sender": "init1YW5lcg==", "module_name": "coin" });
        assert!(matches!(
            MessageKind::classify(&msg),
            MessageKind::Signed { .. }
        ));
    }
}
