use crate::component::{
    ArpCache, ArpTable, CacheInputs, Component, LookupReply, Slot, TableInputs,
};
use crate::config::InterfaceConfig;
use std::net::Ipv4Addr;

#[derive(Clone, Debug, Default)]
pub struct ResolverInputs {
    /// Address the client wants resolved.
    pub request: Option<Ipv4Addr>,
    /// Client readiness for the answer.
    pub answer_ready: bool,
    /// Binding to learn, passed straight through to the table's insert port.
    pub insert: Option<Slot>,
    /// Starts the table's clear sweep.
    pub clear: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ResolverOutputs {
    pub request_taken: bool,
    pub answer: Option<LookupReply>,
    pub insert_taken: bool,
    pub clear_done: bool,
}

/// The cache wired in front of the table.
///
/// Lookups enter through the cache; the ones no rule answers cross to the table over the
/// shared storage port, where they contend with the learn path's inserts. Everything the
/// two components do individually holds unchanged here — this struct only owns the wiring:
/// the cache's table-facing levels are sampled before the tick, the table steps first, and
/// its grant and reply reach the cache within the same tick.
///
/// Clearing the table does not touch the cache's remembered entry; `reset` drops it along
/// with all other in-flight state, and leaves table storage in place.
pub struct Resolver {
    cache: ArpCache,
    table: ArpTable,
}

impl Resolver {
    pub fn new(config: InterfaceConfig) -> Self {
        Resolver {
            cache: ArpCache::new(config),
            table: ArpTable::new(),
        }
    }

    /// The table's diagnostic port stays reachable while the resolver runs.
    pub fn table(&self) -> &ArpTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ArpTable {
        &mut self.table
    }

    /// True when a new lookup would be accepted on the next step.
    pub fn request_ready(&self) -> bool {
        self.cache.request_ready()
    }
}

impl Component for Resolver {
    type Inputs = ResolverInputs;
    type Outputs = ResolverOutputs;

    fn step(&mut self, inputs: ResolverInputs) -> ResolverOutputs {
        let query = self.cache.query_offer();
        let reply_ready = self.cache.awaiting_reply();

        let table_out = self.table.step(TableInputs {
            insert: inputs.insert,
            query,
            clear: inputs.clear,
            reply_ready,
        });
        let cache_out = self.cache.step(CacheInputs {
            request: inputs.request,
            answer_ready: inputs.answer_ready,
            query_taken: table_out.query_taken,
            reply: table_out.reply,
        });

        ResolverOutputs {
            request_taken: cache_out.request_taken,
            answer: cache_out.answer,
            insert_taken: table_out.insert_taken,
            clear_done: table_out.clear_done,
        }
    }

    fn reset(&mut self) {
        self.cache.reset();
        self.table.reset();
    }
}
