// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! In-process JSON-RPC node for exercising deployments without a devnet.
//!
//! The node serves just enough of the `eth_` namespace for a contract creation: it accepts the
//! transaction, then either never mines it or reports a receipt with the configured status.

use std::sync::{Arc, Mutex};

use alloy::primitives::{address, b256, Address, TxHash, U256};
use serde_json::{json, Value};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};
use typed_builder::TypedBuilder;

/// Unlocked account reported by `eth_accounts`.
pub const SENDER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Hash returned for every submitted transaction.
pub const TX_HASH: TxHash =
    b256!("0x1111111111111111111111111111111111111111111111111111111111111111");

const CHAIN_ID: u64 = 31337;
const GAS_PRICE: u64 = 1_000_000_000;
const GAS_ESTIMATE: u64 = 100_000;

#[derive(Clone, TypedBuilder)]
pub struct MockNode {
    #[builder(default = vec![SENDER])]
    accounts: Vec<Address>,
    #[builder(default = U256::from(10u128.pow(21)))]
    balance: U256,
    /// Status of the deployment receipt. `None` leaves the transaction pending forever.
    #[builder(default, setter(strip_option))]
    receipt_status: Option<bool>,
    /// Base fee of the latest block. `None` makes the node look pre-London.
    #[builder(default = Some(7))]
    base_fee: Option<u64>,
}

/// A node listening on a local port until the test ends.
pub struct RunningNode {
    url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl RunningNode {
    pub fn url(&self) -> String {
        self.url.clone()
    }

    /// Number of requests received for `method`.
    pub fn calls(&self, method: &str) -> usize {
        self.params(method).len()
    }

    /// Params of every request received for `method`, in arrival order.
    pub fn params(&self, method: &str) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|req| req["method"] == method)
            .map(|req| req["params"].clone())
            .collect()
    }
}

impl MockNode {
    pub async fn spawn(self) -> RunningNode {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let node = Arc::new(self);
        let log = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, node.clone(), log.clone()));
            }
        });
        RunningNode { url, requests }
    }

    fn respond(&self, method: &str) -> Result<Value, Value> {
        let quantity = |n: u64| json!(format!("{n:#x}"));
        Ok(match method {
            "eth_chainId" => quantity(CHAIN_ID),
            "eth_accounts" => json!(self.accounts),
            "eth_blockNumber" => quantity(1),
            "eth_getBlockByNumber" => self.block(),
            "eth_getTransactionCount" => quantity(0),
            "eth_getBalance" => json!(self.balance),
            "eth_gasPrice" => quantity(GAS_PRICE),
            "eth_estimateGas" => quantity(GAS_ESTIMATE),
            "eth_sendTransaction" | "eth_sendRawTransaction" => json!(TX_HASH),
            "eth_getTransactionReceipt" => match self.receipt_status {
                Some(status) => self.receipt(status),
                None => Value::Null,
            },
            _ => return Err(json!({ "code": -32601, "message": "method not found" })),
        })
    }

    fn block(&self) -> Value {
        let mut block = json!({
            "hash": b256!("0x2222222222222222222222222222222222222222222222222222222222222222"),
            "parentHash": TxHash::ZERO,
            "sha3Uncles": TxHash::ZERO,
            "miner": Address::ZERO,
            "stateRoot": TxHash::ZERO,
            "transactionsRoot": TxHash::ZERO,
            "receiptsRoot": TxHash::ZERO,
            "logsBloom": empty_bloom(),
            "difficulty": "0x0",
            "number": "0x1",
            "gasLimit": "0x1c9c380",
            "gasUsed": "0x0",
            "timestamp": "0x1",
            "extraData": "0x",
            "mixHash": TxHash::ZERO,
            "nonce": "0x0000000000000000",
            "uncles": [],
            "transactions": [],
        });
        if let Some(base_fee) = self.base_fee {
            block["baseFeePerGas"] = json!(format!("{base_fee:#x}"));
        }
        block
    }

    fn receipt(&self, status: bool) -> Value {
        json!({
            "type": "0x2",
            "status": if status { "0x1" } else { "0x0" },
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": empty_bloom(),
            "transactionHash": TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": b256!("0x2222222222222222222222222222222222222222222222222222222222222222"),
            "blockNumber": "0x1",
            "gasUsed": "0x5208",
            "effectiveGasPrice": format!("{GAS_PRICE:#x}"),
            "from": SENDER,
            "to": null,
            "contractAddress": SENDER.create(0),
        })
    }
}

fn empty_bloom() -> String {
    format!("0x{}", "0".repeat(512))
}

/// Serves keep-alive HTTP/1.1 JSON-RPC requests on one connection.
async fn serve(mut stream: TcpStream, node: Arc<MockNode>, log: Arc<Mutex<Vec<Value>>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let Some((head_len, body_len)) = parse_head(&buf) else {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
            continue;
        };
        if buf.len() < head_len + body_len {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
            continue;
        }

        let body: Vec<u8> = buf.drain(..head_len + body_len).skip(head_len).collect();
        let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        log.lock().unwrap().push(request.clone());

        let method = request["method"].as_str().unwrap_or_default();
        let mut response = json!({ "jsonrpc": "2.0", "id": request["id"] });
        match node.respond(method) {
            Ok(result) => response["result"] = result,
            Err(error) => response["error"] = error,
        }
        let payload = response.to_string();
        let reply = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
            payload.len(),
            payload
        );
        if stream.write_all(reply.as_bytes()).await.is_err() {
            return;
        }
    }
}

/// Length of the request head and the declared body length, once the head is complete.
fn parse_head(buf: &[u8]) -> Option<(usize, usize)> {
    let end = buf.windows(4).position(|w| w == b"\r\n\r\n")? + 4;
    let head = String::from_utf8_lossy(&buf[..end]);
    let body_len = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0);
    Some((end, body_len))
}
