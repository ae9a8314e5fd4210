use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use tokio::runtime::Handle;
use tracing::debug;

use crate::console::{Mutation, Operation, Outcome, PendingOperation, ResultEvent};
use crate::gateway::RuntimeGateway;

/// Runs pending operations on the tokio runtime and hands their results back
/// to the event loop over a channel. Nothing here touches console state.
#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn RuntimeGateway>,
    handle: Handle,
    tx: Sender<ResultEvent>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn RuntimeGateway>, handle: Handle) -> (Self, Receiver<ResultEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { gateway, handle, tx }, rx)
    }

    pub fn dispatch(&self, pending: PendingOperation) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        debug!(seq = pending.seq, operation = %pending.operation, "dispatching");
        self.handle.spawn(async move {
            let outcome = execute(gateway.as_ref(), &pending.operation).await;
            let event = ResultEvent::for_pending(&pending, outcome);
            if tx.send(event).is_err() {
                debug!(seq = pending.seq, "event loop gone, dropping result");
            }
        });
    }

    pub fn dispatch_all(&self, pending: Vec<PendingOperation>) {
        for op in pending {
            self.dispatch(op);
        }
    }
}

async fn execute(gateway: &dyn RuntimeGateway, operation: &Operation) -> Outcome {
    match operation {
        Operation::ListWorkloads => Outcome::Workloads(gateway.list_workloads().await),
        Operation::Mutate(mutation, id) => {
            let result = match mutation {
                Mutation::Start => gateway.start(id).await,
                Mutation::Stop => gateway.stop(id).await,
                Mutation::Restart => gateway.restart(id).await,
            };
            Outcome::Mutated {
                mutation: *mutation,
                id: id.clone(),
                result,
            }
        }
        Operation::FetchLogs(id) => Outcome::Logs {
            id: id.clone(),
            result: gateway.fetch_logs(id).await,
        },
        Operation::FetchStats(id) => Outcome::Stats {
            id: id.clone(),
            result: gateway.fetch_stats(id).await,
        },
    }
}
