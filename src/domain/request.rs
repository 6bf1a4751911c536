use crate::domain::value::{Account, ClientId, Did, Pop};

/// `getDIDsInfo`: list DIDs, optionally narrowed by reseller client and/or DID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetDidsInfo {
    client: Option<ClientId>,
    did: Option<Did>,
}

impl GetDidsInfo {
    pub fn new(client: Option<ClientId>, did: Option<Did>) -> Self {
        Self { client, did }
    }

    /// Every DID on the account.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_client(client: ClientId) -> Self {
        Self {
            client: Some(client),
            did: None,
        }
    }

    pub fn for_did(did: Did) -> Self {
        Self {
            client: None,
            did: Some(did),
        }
    }

    pub fn client(&self) -> Option<&ClientId> {
        self.client.as_ref()
    }

    pub fn did(&self) -> Option<&Did> {
        self.did.as_ref()
    }
}

/// `setDIDPOP`: route a DID through another POP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDidPop {
    did: Did,
    pop: Pop,
}

impl SetDidPop {
    pub fn new(did: Did, pop: Pop) -> Self {
        Self { did, pop }
    }

    pub fn did(&self) -> &Did {
        &self.did
    }

    pub fn pop(&self) -> Pop {
        self.pop
    }
}

/// `getServersInfo`: list servers, optionally a single POP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetServersInfo {
    server_pop: Option<Pop>,
}

impl GetServersInfo {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_pop(pop: Pop) -> Self {
        Self {
            server_pop: Some(pop),
        }
    }

    pub fn server_pop(&self) -> Option<Pop> {
        self.server_pop
    }
}

/// `getRegistrationStatus` for one SIP account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRegistrationStatus {
    account: Account,
}

impl GetRegistrationStatus {
    pub fn new(account: Account) -> Self {
        Self { account }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }
}

/// `getClients`: every reseller client, or one by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetClients {
    client: Option<ClientId>,
}

impl GetClients {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn one(client: ClientId) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn client(&self) -> Option<&ClientId> {
        self.client.as_ref()
    }
}
