//! In-memory guild host double for engine tests.
//!
//! `MemoryHost` keeps fake guilds behind the same `GuildHost` trait the
//! Discord layer implements, mutates them the way the platform would, and
//! records every call so tests can assert on ordering and on exactly which
//! mutations were issued.

#![allow(dead_code)]

use async_trait::async_trait;
use fresco_core::{
    CategorySpec, ChannelId, ChannelKind, ChannelSpec, GuildId, GuildSnapshot, MemberId,
    OverwriteSpec, PermissionPair, PermissionSet, RoleId, RoleSpec,
};
use fresco_error::HostError;
use fresco_sync::{GuildHost, ProgressSink};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Mutable fake guild state.
#[derive(Debug, Clone)]
pub struct FakeGuild {
    pub name: String,
    pub everyone: RoleId,
    pub roles: Vec<RoleSpec>,
    pub categories: Vec<CategorySpec>,
    pub channels: Vec<ChannelSpec>,
    pub bitrate_ceiling: u32,
    pub acting_ceiling: u16,
    pub members: HashSet<MemberId>,
}

impl FakeGuild {
    /// A guild containing only its "everyone" role at position 0.
    pub fn new(name: &str, everyone: u64) -> Self {
        Self {
            name: name.to_string(),
            everyone: RoleId(everyone),
            roles: vec![RoleSpec {
                id: RoleId(everyone),
                name: "@everyone".to_string(),
                permissions: PermissionSet::EMPTY,
                color: 0,
                hoist: false,
                mentionable: false,
                position: 0,
                managed: false,
            }],
            categories: Vec::new(),
            channels: Vec::new(),
            bitrate_ceiling: 96_000,
            acting_ceiling: 100,
            members: HashSet::new(),
        }
    }

    pub fn with_role(mut self, role: RoleSpec) -> Self {
        self.roles.push(role);
        self
    }

    pub fn with_category(mut self, category: CategorySpec) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_channel(mut self, channel: ChannelSpec) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn with_member(mut self, member: u64) -> Self {
        self.members.insert(MemberId(member));
        self
    }

    pub fn with_acting_ceiling(mut self, ceiling: u16) -> Self {
        self.acting_ceiling = ceiling;
        self
    }

    pub fn with_bitrate_ceiling(mut self, ceiling: u32) -> Self {
        self.bitrate_ceiling = ceiling;
        self
    }

    pub fn role_named(&self, name: &str) -> Option<&RoleSpec> {
        self.roles.iter().find(|r| r.name == name)
    }

    pub fn category_named(&self, name: &str) -> Option<&CategorySpec> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn channel_named(&self, name: &str) -> Option<&ChannelSpec> {
        self.channels.iter().find(|c| c.name == name)
    }
}

pub fn role(id: u64, name: &str, position: u16) -> RoleSpec {
    RoleSpec {
        id: RoleId(id),
        name: name.to_string(),
        permissions: PermissionSet(0x400),
        color: 0x3498db,
        hoist: false,
        mentionable: false,
        position,
        managed: false,
    }
}

pub fn managed_role(id: u64, name: &str, position: u16) -> RoleSpec {
    RoleSpec {
        managed: true,
        ..role(id, name, position)
    }
}

pub fn category(id: u64, name: &str, position: u16, overwrites: Vec<OverwriteSpec>) -> CategorySpec {
    CategorySpec {
        id: ChannelId(id),
        name: name.to_string(),
        position,
        overwrites,
    }
}

pub fn text_channel(id: u64, name: &str, position: u16, parent: Option<u64>) -> ChannelSpec {
    ChannelSpec {
        id: ChannelId(id),
        name: name.to_string(),
        position,
        parent: parent.map(ChannelId),
        overwrites: Vec::new(),
        kind: ChannelKind::Text {
            topic: None,
            slowmode_secs: 0,
            nsfw: false,
        },
    }
}

pub fn voice_channel(
    id: u64,
    name: &str,
    position: u16,
    parent: Option<u64>,
    bitrate: u32,
) -> ChannelSpec {
    ChannelSpec {
        id: ChannelId(id),
        name: name.to_string(),
        position,
        parent: parent.map(ChannelId),
        overwrites: Vec::new(),
        kind: ChannelKind::Voice {
            bitrate,
            user_limit: Some(10),
        },
    }
}

pub fn overwrite_for_role(role: u64, allow: u64, deny: u64) -> OverwriteSpec {
    OverwriteSpec::new(
        fresco_core::Principal::Role(RoleId(role)),
        PermissionPair::new(PermissionSet(allow), PermissionSet(deny)),
    )
}

pub fn overwrite_for_member(member: u64, allow: u64, deny: u64) -> OverwriteSpec {
    OverwriteSpec::new(
        fresco_core::Principal::Member(MemberId(member)),
        PermissionPair::new(PermissionSet(allow), PermissionSet(deny)),
    )
}

/// One recorded host call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Snapshot(GuildId),
    HasMember(GuildId, MemberId),
    DeleteChannel(GuildId, ChannelId),
    DeleteRole(GuildId, RoleId),
    CreateRole(GuildId, String),
    EditRole(GuildId, RoleId),
    CreateCategory(GuildId, String),
    CreateChannel(GuildId, String, Option<ChannelId>),
    RepositionRoles(GuildId, Vec<(RoleId, u16)>),
}

impl Call {
    /// Whether the call changes guild state.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::Snapshot(_) | Call::HasMember(_, _))
    }
}

/// Stateful `GuildHost` double with call recording and fault injection.
pub struct MemoryHost {
    guilds: Mutex<HashMap<GuildId, FakeGuild>>,
    calls: Mutex<Vec<Call>>,
    fail_keys: Mutex<HashSet<String>>,
    next_id: AtomicU64,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            guilds: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            fail_keys: Mutex::new(HashSet::new()),
            next_id: AtomicU64::new(9000),
        }
    }

    pub fn with_guild(self, id: u64, guild: FakeGuild) -> Self {
        self.guilds.lock().unwrap().insert(GuildId(id), guild);
        self
    }

    /// Make the operation identified by `key` fail, e.g.
    /// `"create_role:Admin"` or `"reposition_roles"`.
    pub fn fail_on(&self, key: impl Into<String>) {
        self.fail_keys.lock().unwrap().insert(key.into());
    }

    pub fn guild(&self, id: u64) -> FakeGuild {
        self.guilds
            .lock()
            .unwrap()
            .get(&GuildId(id))
            .expect("guild registered in the double")
            .clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls().iter().filter(|c| c.is_mutation()).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_fail(&self, key: &str) -> Result<(), HostError> {
        if self.fail_keys.lock().unwrap().contains(key) {
            Err(HostError::new(format!("injected failure: {key}")))
        } else {
            Ok(())
        }
    }

    fn alloc_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl GuildHost for MemoryHost {
    async fn snapshot(&self, guild: GuildId) -> Result<GuildSnapshot, HostError> {
        self.record(Call::Snapshot(guild));
        let guilds = self.guilds.lock().unwrap();
        let fake = guilds
            .get(&guild)
            .ok_or_else(|| HostError::new(format!("Unknown Guild: {guild}")))?;
        Ok(GuildSnapshot {
            id: guild,
            name: fake.name.clone(),
            everyone: fake.everyone,
            roles: fake.roles.clone(),
            categories: fake.categories.clone(),
            channels: fake.channels.clone(),
            bitrate_ceiling: fake.bitrate_ceiling,
            acting_ceiling: fake.acting_ceiling,
        })
    }

    async fn has_member(&self, guild: GuildId, member: MemberId) -> Result<bool, HostError> {
        self.record(Call::HasMember(guild, member));
        let guilds = self.guilds.lock().unwrap();
        let fake = guilds
            .get(&guild)
            .ok_or_else(|| HostError::new(format!("Unknown Guild: {guild}")))?;
        Ok(fake.members.contains(&member))
    }

    async fn delete_channel(&self, guild: GuildId, channel: ChannelId) -> Result<(), HostError> {
        self.record(Call::DeleteChannel(guild, channel));
        let mut guilds = self.guilds.lock().unwrap();
        let fake = guilds
            .get_mut(&guild)
            .ok_or_else(|| HostError::new(format!("Unknown Guild: {guild}")))?;
        let name = fake
            .channels
            .iter()
            .find(|c| c.id == channel)
            .map(|c| c.name.clone())
            .or_else(|| {
                fake.categories
                    .iter()
                    .find(|c| c.id == channel)
                    .map(|c| c.name.clone())
            })
            .ok_or_else(|| HostError::new(format!("Unknown Channel: {channel}")))?;
        self.check_fail(&format!("delete_channel:{name}"))?;
        fake.channels.retain(|c| c.id != channel);
        fake.categories.retain(|c| c.id != channel);
        Ok(())
    }

    async fn delete_role(&self, guild: GuildId, role: RoleId) -> Result<(), HostError> {
        self.record(Call::DeleteRole(guild, role));
        let mut guilds = self.guilds.lock().unwrap();
        let fake = guilds
            .get_mut(&guild)
            .ok_or_else(|| HostError::new(format!("Unknown Guild: {guild}")))?;
        let name = fake
            .roles
            .iter()
            .find(|r| r.id == role)
            .map(|r| r.name.clone())
            .ok_or_else(|| HostError::new(format!("Unknown Role: {role}")))?;
        self.check_fail(&format!("delete_role:{name}"))?;
        fake.roles.retain(|r| r.id != role);
        Ok(())
    }

    async fn create_role(&self, guild: GuildId, spec: &RoleSpec) -> Result<RoleId, HostError> {
        self.record(Call::CreateRole(guild, spec.name.clone()));
        self.check_fail(&format!("create_role:{}", spec.name))?;
        let id = RoleId(self.alloc_id());
        let mut guilds = self.guilds.lock().unwrap();
        let fake = guilds
            .get_mut(&guild)
            .ok_or_else(|| HostError::new(format!("Unknown Guild: {guild}")))?;
        let position = fake
            .roles
            .iter()
            .map(|r| r.position)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        fake.roles.push(RoleSpec {
            id,
            name: spec.name.clone(),
            permissions: spec.permissions,
            color: spec.color,
            hoist: spec.hoist,
            mentionable: spec.mentionable,
            position,
            managed: false,
        });
        Ok(id)
    }

    async fn edit_role(
        &self,
        guild: GuildId,
        role: RoleId,
        spec: &RoleSpec,
    ) -> Result<(), HostError> {
        self.record(Call::EditRole(guild, role));
        self.check_fail(&format!("edit_role:{}", spec.name))?;
        let mut guilds = self.guilds.lock().unwrap();
        let fake = guilds
            .get_mut(&guild)
            .ok_or_else(|| HostError::new(format!("Unknown Guild: {guild}")))?;
        let current = fake
            .roles
            .iter_mut()
            .find(|r| r.id == role)
            .ok_or_else(|| HostError::new(format!("Unknown Role: {role}")))?;
        if current.managed {
            return Err(HostError::new("Cannot edit a managed role"));
        }
        current.permissions = spec.permissions;
        current.color = spec.color;
        current.hoist = spec.hoist;
        current.mentionable = spec.mentionable;
        Ok(())
    }

    async fn create_category(
        &self,
        guild: GuildId,
        category: &CategorySpec,
        overwrites: Vec<OverwriteSpec>,
    ) -> Result<ChannelId, HostError> {
        self.record(Call::CreateCategory(guild, category.name.clone()));
        self.check_fail(&format!("create_category:{}", category.name))?;
        let id = ChannelId(self.alloc_id());
        let mut guilds = self.guilds.lock().unwrap();
        let fake = guilds
            .get_mut(&guild)
            .ok_or_else(|| HostError::new(format!("Unknown Guild: {guild}")))?;
        fake.categories.push(CategorySpec {
            id,
            name: category.name.clone(),
            position: category.position,
            overwrites,
        });
        Ok(id)
    }

    async fn create_channel(
        &self,
        guild: GuildId,
        channel: &ChannelSpec,
        parent: Option<ChannelId>,
        overwrites: Vec<OverwriteSpec>,
    ) -> Result<ChannelId, HostError> {
        self.record(Call::CreateChannel(guild, channel.name.clone(), parent));
        self.check_fail(&format!("create_channel:{}", channel.name))?;
        let id = ChannelId(self.alloc_id());
        let mut guilds = self.guilds.lock().unwrap();
        let fake = guilds
            .get_mut(&guild)
            .ok_or_else(|| HostError::new(format!("Unknown Guild: {guild}")))?;
        if let Some(parent_id) = parent {
            if !fake.categories.iter().any(|c| c.id == parent_id) {
                return Err(HostError::new(format!("Unknown parent: {parent_id}")));
            }
        }
        fake.channels.push(ChannelSpec {
            id,
            name: channel.name.clone(),
            position: channel.position,
            parent,
            overwrites,
            kind: channel.kind.clone(),
        });
        Ok(id)
    }

    async fn reposition_roles(
        &self,
        guild: GuildId,
        positions: Vec<(RoleId, u16)>,
    ) -> Result<(), HostError> {
        self.record(Call::RepositionRoles(guild, positions.clone()));
        self.check_fail("reposition_roles")?;
        let mut guilds = self.guilds.lock().unwrap();
        let fake = guilds
            .get_mut(&guild)
            .ok_or_else(|| HostError::new(format!("Unknown Guild: {guild}")))?;
        for (role, position) in positions {
            if let Some(current) = fake.roles.iter_mut().find(|r| r.id == role) {
                current.position = position;
            }
        }
        Ok(())
    }
}

/// Progress sink collecting every emitted line.
#[derive(Default)]
pub struct CollectingSink {
    lines: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressSink for CollectingSink {
    async fn emit(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}
