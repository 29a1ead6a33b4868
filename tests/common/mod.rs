//
//  bitbucket-client
//  tests/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! In-memory Bitbucket Cloud for integration tests.
//!
//! [`FixtureBitbucket`] implements [`Transport`] and answers the endpoints the
//! client uses from seeded state. Collections are served `PAGE_LEN` items per
//! page with absolute `next` links, like the real API.
//!
//! Seeded data:
//!
//! - `mirror/mercurial`: a public repository with a long linear history,
//!   watchers, forks and pull request #2 (declined, with comments)
//! - `fixture-user/test-repository`: five commits on three branches
//!
//! ```text
//!   c1 -- c2            master
//!          |\
//!          | c3 -- c4   branchToAccept
//!          |
//!          c5           branchToDecline (touches nothing under src/)
//! ```

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::Method;
use serde_json::{json, Value};
use url::Url;

use bitbucket_client::api::{ApiError, ApiRequest, BitbucketClient, RawResponse, Transport};

pub const BASE_URL: &str = "https://bitbucket.fixture/2.0";
pub const PAGE_LEN: usize = 10;

pub const CURRENT_USER: &str = "fixture-user";
pub const KNOWN_USERS: [&str; 4] = [CURRENT_USER, "goodtune", "jdoe", "mirror-admin"];

pub const MIRROR_WORKSPACE: &str = "mirror";
pub const MERCURIAL_REPO: &str = "mercurial";
pub const MERCURIAL_COMMITS: usize = 150;
pub const MERCURIAL_WATCHERS: usize = 12;
pub const MERCURIAL_FORKS: usize = 13;
pub const KNOWN_HASH: &str = "abae1eb695c077fa21b6ef0b7056f36d63cf0302";

pub const TEST_REPO: &str = "test-repository";
pub const FIRST_COMMIT: &str = "c1000000000000000000000000000000000000c1";

pub const DECLINED_PR: u64 = 2;
pub const OPEN_PR: u64 = 7;
pub const MIRROR_COMMENT_ID: u64 = 53789;
pub const MIRROR_COMMENT: &str = "This repo is not used for development, it's just a mirror \
     (and I am just an infrequent contributor). Please consult \
     http://mercurial.selenic.com/wiki/ContributingChanges and send your patch to \
     ``mercurial-devel`` ML.";
pub const FORBIDDEN_MESSAGE: &str = "You cannot administer other userspersonal accounts.";

pub const PR_DIFF: &str = "diff --git a/contrib/hg-ssh b/contrib/hg-ssh\n\
--- a/contrib/hg-ssh\n\
+++ b/contrib/hg-ssh\n\
@@ -24,6 +24,7 @@\n\
 import sys, os, shlex\n\
+readonly = False\n";

struct FixtureCommit {
    hash: String,
    message: String,
    date: String,
    parents: Vec<String>,
    paths: Vec<String>,
}

struct FixtureRepo {
    json: Value,
    /// Newest first.
    commits: Vec<FixtureCommit>,
    branches: BTreeMap<String, String>,
    watchers: Vec<Value>,
    forks: Vec<Value>,
    pull_requests: BTreeMap<u64, FixturePullRequest>,
}

struct FixturePullRequest {
    json: Value,
    activity: Vec<Value>,
    comments: Vec<Value>,
    commits: Vec<Value>,
    diff: String,
}

#[derive(Default)]
struct State {
    repos: BTreeMap<String, FixtureRepo>,
    approvals: HashSet<String>,
    builds: BTreeMap<(String, String), Value>,
    log: Vec<String>,
    next_id: u64,
}

/// Stateful in-memory Bitbucket.
#[derive(Clone)]
pub struct FixtureBitbucket {
    state: Arc<Mutex<State>>,
}

impl FixtureBitbucket {
    pub fn new() -> Self {
        let mut state = State {
            next_id: 1000,
            ..State::default()
        };
        state
            .repos
            .insert(repo_key(MIRROR_WORKSPACE, MERCURIAL_REPO), mercurial_repo());
        state
            .repos
            .insert(repo_key(CURRENT_USER, TEST_REPO), test_repo());

        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// A client whose requests go to this fixture.
    pub fn client(&self) -> BitbucketClient {
        BitbucketClient::with_transport(BASE_URL, self.clone()).unwrap()
    }

    /// Every request so far, as `METHOD path?query`.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }

    /// Requests whose path ends with `suffix`.
    pub fn requests_to(&self, suffix: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| {
                let path = r.split('?').next().unwrap_or("");
                path.ends_with(suffix)
            })
            .collect()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().log.clear();
    }

    fn handle(&self, request: &ApiRequest) -> RawResponse {
        let url = request.full_url();
        let mut state = self.state.lock().unwrap();
        state.log.push(format!(
            "{} {}{}",
            request.method,
            url.path(),
            url.query().map(|q| format!("?{}", q)).unwrap_or_default()
        ));

        let path = url.path().trim_start_matches("/2.0").trim_matches('/');
        let decoded: Vec<String> = path
            .split('/')
            .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
            .collect();
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();
        let method = request.method.clone();
        let body = request.body.as_ref();

        match segments.as_slice() {
            ["user"] if method == Method::GET => ok(user_json(CURRENT_USER)),
            ["users", id] if method == Method::GET => {
                if KNOWN_USERS.contains(id) {
                    ok(user_json(id))
                } else {
                    not_found(&format!("User {} not found", id))
                }
            }
            ["repositories", ws] if method == Method::GET => {
                let repos: Vec<Value> = state
                    .repos
                    .values()
                    .filter(|r| r.json["workspace"]["slug"] == *ws)
                    .map(|r| r.json.clone())
                    .collect();
                if repos.is_empty() {
                    return not_found("Workspace not found");
                }
                page(&url, repos)
            }
            ["repositories", ws, slug] => repository_route(&mut state, &method, ws, slug, body),
            ["repositories", ws, slug, rest @ ..] => {
                let key = repo_key(ws, slug);
                if !state.repos.contains_key(&key) {
                    return not_found(&format!("Repository {} not found", key));
                }
                repository_child_route(&mut state, &method, &url, &key, rest, body)
            }
            _ => not_found("Resource not found"),
        }
    }
}

#[async_trait]
impl Transport for FixtureBitbucket {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        Ok(self.handle(&request))
    }
}

fn repository_route(
    state: &mut State,
    method: &Method,
    ws: &str,
    slug: &str,
    body: Option<&Value>,
) -> RawResponse {
    let key = repo_key(ws, slug);
    match method.as_str() {
        "GET" => match state.repos.get(&key) {
            Some(repo) => ok(repo.json.clone()),
            None => not_found(&format!("Repository {} not found", key)),
        },
        "POST" => {
            if ws != CURRENT_USER {
                return error(403, FORBIDDEN_MESSAGE);
            }
            if state.repos.contains_key(&key) {
                return error(400, "Repository with this Slug and Owner already exists.");
            }
            state.next_id += 1;
            let uuid = format!("{{00000000-0000-0000-0000-{:012}}}", state.next_id);
            let mut json = repository_json(ws, slug, &uuid);
            merge_repository_fields(&mut json, body);
            state.repos.insert(key, empty_repo(json.clone()));
            ok(json)
        }
        "PUT" => match state.repos.get_mut(&key) {
            Some(repo) => {
                merge_repository_fields(&mut repo.json, body);
                ok(repo.json.clone())
            }
            None => not_found(&format!("Repository {} not found", key)),
        },
        "DELETE" => match state.repos.remove(&key) {
            Some(_) => RawResponse::new(204, ""),
            None => not_found(&format!("Repository {} not found", key)),
        },
        _ => error(405, "Method not allowed"),
    }
}

fn repository_child_route(
    state: &mut State,
    method: &Method,
    url: &Url,
    key: &str,
    rest: &[&str],
    body: Option<&Value>,
) -> RawResponse {
    let get = *method == Method::GET;
    match rest {
        ["watchers"] if get => page(url, state.repos[key].watchers.clone()),
        ["forks"] if get => page(url, state.repos[key].forks.clone()),
        ["refs", "branches"] if get => {
            let repo = &state.repos[key];
            let branches = repo
                .branches
                .iter()
                .map(|(name, head)| json!({"name": name, "type": "branch", "target": {"hash": head}}))
                .collect();
            page(url, branches)
        }
        ["commits"] if get => list_commits(state, url, key),
        ["commit", hash] if get => match find_commit(state, key, hash) {
            Some(json) => ok(json),
            None => not_found(&format!("Commit {} not found", hash)),
        },
        ["commit", hash, "approve"] => {
            let full = match find_commit(state, key, hash) {
                Some(json) => json["hash"].as_str().unwrap_or_default().to_string(),
                None => return not_found(&format!("Commit {} not found", hash)),
            };
            match method.as_str() {
                "POST" => {
                    state.approvals.insert(full);
                    ok(participant_json(CURRENT_USER))
                }
                "DELETE" => {
                    state.approvals.remove(&full);
                    RawResponse::new(204, "")
                }
                _ => error(405, "Method not allowed"),
            }
        }
        ["commit", hash, "statuses"] if get => {
            let builds = state
                .builds
                .iter()
                .filter(|((h, _), _)| h.as_str() == *hash)
                .map(|(_, v)| v.clone())
                .collect();
            page(url, builds)
        }
        ["commit", hash, "statuses", "build"] if *method == Method::POST => {
            let Some(body) = body else {
                return error(400, "Missing build status");
            };
            let build_key = body["key"].as_str().unwrap_or_default().to_string();
            let mut stored = body.clone();
            stored["created_on"] = json!("2026-01-12T10:00:00+00:00");
            stored["updated_on"] = json!("2026-01-12T10:00:00+00:00");
            state
                .builds
                .insert((hash.to_string(), build_key), stored.clone());
            ok(stored)
        }
        ["commit", hash, "statuses", "build", build_key] => {
            let id = (hash.to_string(), build_key.to_string());
            match method.as_str() {
                "GET" => match state.builds.get(&id) {
                    Some(build) => ok(build.clone()),
                    None => not_found(&format!("Build status {} not found", build_key)),
                },
                "PUT" => match (state.builds.get_mut(&id), body) {
                    (Some(build), Some(body)) => {
                        if let (Some(target), Some(source)) = (build.as_object_mut(), body.as_object()) {
                            for (k, v) in source {
                                target.insert(k.clone(), v.clone());
                            }
                        }
                        build["updated_on"] = json!("2026-01-12T11:00:00+00:00");
                        ok(build.clone())
                    }
                    _ => not_found(&format!("Build status {} not found", build_key)),
                },
                _ => error(405, "Method not allowed"),
            }
        }
        ["pullrequests"] => pull_requests_route(state, method, url, key, body),
        ["pullrequests", id, rest @ ..] => {
            let Ok(id) = id.parse::<u64>() else {
                return not_found("Pull request not found");
            };
            pull_request_route(state, method, url, key, id, rest)
        }
        _ => not_found("Resource not found"),
    }
}

fn pull_requests_route(
    state: &mut State,
    method: &Method,
    url: &Url,
    key: &str,
    body: Option<&Value>,
) -> RawResponse {
    let repo = state.repos.get_mut(key).unwrap();
    match method.as_str() {
        "GET" => {
            let mut states: Vec<String> = url
                .query_pairs()
                .filter(|(k, _)| k == "state")
                .map(|(_, v)| v.into_owned())
                .collect();
            if states.is_empty() {
                states.push("OPEN".to_string());
            }
            let prs = repo
                .pull_requests
                .values()
                .rev()
                .filter(|pr| states.iter().any(|s| pr.json["state"] == s.as_str()))
                .map(|pr| pr.json.clone())
                .collect();
            page(url, prs)
        }
        "POST" => {
            let Some(body) = body else {
                return error(400, "Missing pull request");
            };
            let id = repo.pull_requests.keys().max().copied().unwrap_or(0) + 1;
            let source = body["source"]["branch"]["name"].as_str().unwrap_or_default();
            let destination = body["destination"]["branch"]["name"]
                .as_str()
                .unwrap_or("master");
            let title = body["title"].as_str().unwrap_or_default();
            let json = pull_request_json(id, title, "OPEN", CURRENT_USER, source, destination);
            repo.pull_requests.insert(
                id,
                FixturePullRequest {
                    json: json.clone(),
                    activity: Vec::new(),
                    comments: Vec::new(),
                    commits: Vec::new(),
                    diff: String::new(),
                },
            );
            ok(json)
        }
        _ => error(405, "Method not allowed"),
    }
}

fn pull_request_route(
    state: &mut State,
    method: &Method,
    url: &Url,
    key: &str,
    id: u64,
    rest: &[&str],
) -> RawResponse {
    let repo = state.repos.get_mut(key).unwrap();
    let Some(pr) = repo.pull_requests.get_mut(&id) else {
        return not_found(&format!("Pull request {} not found", id));
    };
    let get = *method == Method::GET;

    match rest {
        [] if get => ok(pr.json.clone()),
        ["activity"] if get => page(url, pr.activity.clone()),
        ["comments"] if get => page(url, pr.comments.clone()),
        ["comments", comment_id] if get => pr
            .comments
            .iter()
            .find(|c| c["id"].to_string() == *comment_id)
            .cloned()
            .map(ok)
            .unwrap_or_else(|| not_found("Comment not found")),
        ["commits"] if get => page(url, pr.commits.clone()),
        ["diff"] if get => RawResponse::new(200, pr.diff.clone()),
        ["approve"] => match method.as_str() {
            "POST" => ok(participant_json(CURRENT_USER)),
            "DELETE" => RawResponse::new(204, ""),
            _ => error(405, "Method not allowed"),
        },
        ["decline"] if *method == Method::POST => {
            pr.json["state"] = json!("DECLINED");
            ok(pr.json.clone())
        }
        ["merge"] if *method == Method::POST => {
            if pr.json["state"] != "OPEN" {
                return error(400, "You can't merge a pull request that is not open.");
            }
            pr.json["state"] = json!("MERGED");
            ok(pr.json.clone())
        }
        _ => not_found("Resource not found"),
    }
}

fn list_commits(state: &State, url: &Url, key: &str) -> RawResponse {
    let repo = &state.repos[key];
    let values = |name: &str| -> Vec<String> {
        url.query_pairs()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
            .collect()
    };

    let mut heads = Vec::new();
    for name in values("include") {
        match repo.branches.get(&name) {
            Some(head) => heads.push(head.clone()),
            None => return not_found(&format!("Commit not found: {}", name)),
        }
    }
    if heads.is_empty() {
        heads = repo.branches.values().cloned().collect();
    }

    let mut excluded_heads = Vec::new();
    for name in values("exclude") {
        match repo.branches.get(&name) {
            Some(head) => excluded_heads.push(head.clone()),
            None => return not_found(&format!("Commit not found: {}", name)),
        }
    }

    let included = reachable(repo, &heads);
    let excluded = reachable(repo, &excluded_heads);
    let path = values("path").into_iter().next();

    let commits = repo
        .commits
        .iter()
        .filter(|c| included.contains(&c.hash) && !excluded.contains(&c.hash))
        .filter(|c| match &path {
            Some(prefix) => c.paths.iter().any(|p| p.starts_with(prefix.as_str())),
            None => true,
        })
        .map(|c| commit_json(state, key, c))
        .collect();
    page(url, commits)
}

fn reachable(repo: &FixtureRepo, heads: &[String]) -> HashSet<String> {
    let mut seen = HashSet::new();
    let mut stack: Vec<String> = heads.to_vec();
    while let Some(hash) = stack.pop() {
        if !seen.insert(hash.clone()) {
            continue;
        }
        if let Some(commit) = repo.commits.iter().find(|c| c.hash == hash) {
            stack.extend(commit.parents.iter().cloned());
        }
    }
    seen
}

fn find_commit(state: &State, key: &str, hash: &str) -> Option<Value> {
    state.repos[key]
        .commits
        .iter()
        .find(|c| c.hash == hash)
        .map(|c| commit_json(state, key, c))
}

fn commit_json(state: &State, key: &str, commit: &FixtureCommit) -> Value {
    let repo = &state.repos[key].json;
    let participants: Vec<Value> = if state.approvals.contains(&commit.hash) {
        vec![participant_json(CURRENT_USER)]
    } else {
        Vec::new()
    };
    let commit_url = format!("{}/repositories/{}/commit/{}", BASE_URL, key, commit.hash);

    json!({
        "type": "commit",
        "hash": commit.hash,
        "date": commit.date,
        "message": commit.message,
        "author": {
            "raw": "Jane Doe <jane@example.com>",
            "user": user_json("jdoe"),
        },
        "parents": commit.parents.iter().map(|p| json!({
            "hash": p,
            "links": {"self": {"href": format!("{}/repositories/{}/commit/{}", BASE_URL, key, p)}},
        })).collect::<Vec<_>>(),
        "repository": {
            "uuid": repo["uuid"],
            "name": repo["name"],
            "full_name": repo["full_name"],
            "links": repo["links"],
        },
        "summary": {
            "raw": commit.message,
            "markup": "markdown",
            "html": format!("<p>{}</p>", commit.message),
        },
        "participants": participants,
        "links": {
            "self": {"href": commit_url},
            "approve": {"href": format!("{}/approve", commit_url)},
        },
    })
}

fn page(url: &Url, items: Vec<Value>) -> RawResponse {
    let number: usize = url
        .query_pairs()
        .find(|(k, _)| k == "page")
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(1);
    let start = (number - 1) * PAGE_LEN;
    let values: Vec<Value> = items.iter().skip(start).take(PAGE_LEN).cloned().collect();

    let mut body = json!({
        "pagelen": PAGE_LEN,
        "page": number,
        "size": items.len(),
        "values": values,
    });
    if start + PAGE_LEN < items.len() {
        body["next"] = json!(page_url(url, number + 1));
    }
    if number > 1 {
        body["previous"] = json!(page_url(url, number - 1));
    }
    ok(body)
}

fn page_url(url: &Url, number: usize) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut next = url.clone();
    next.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair("page", &number.to_string());
    next.to_string()
}

fn ok(body: Value) -> RawResponse {
    RawResponse::new(200, body.to_string())
}

fn error(status: u16, message: &str) -> RawResponse {
    RawResponse::new(
        status,
        json!({"type": "error", "error": {"message": message}}).to_string(),
    )
}

fn not_found(message: &str) -> RawResponse {
    error(404, message)
}

fn repo_key(ws: &str, slug: &str) -> String {
    format!("{}/{}", ws, slug)
}

fn user_json(nickname: &str) -> Value {
    json!({
        "type": "user",
        "uuid": format!("{{{}}}", nickname),
        "account_id": format!("557058:{}", nickname),
        "display_name": nickname,
        "nickname": nickname,
        "links": {"avatar": {"href": format!("https://avatars.fixture/{}.png", nickname)}},
    })
}

fn participant_json(nickname: &str) -> Value {
    json!({
        "type": "participant",
        "user": user_json(nickname),
        "role": "PARTICIPANT",
        "approved": true,
        "state": "approved",
        "participated_on": "2026-01-12T10:00:00+00:00",
    })
}

fn repository_json(ws: &str, slug: &str, uuid: &str) -> Value {
    json!({
        "type": "repository",
        "uuid": uuid,
        "name": slug,
        "full_name": format!("{}/{}", ws, slug),
        "slug": slug,
        "scm": "git",
        "is_private": false,
        "fork_policy": "allow_forks",
        "has_issues": false,
        "has_wiki": false,
        "mainbranch": {"name": "master", "type": "branch"},
        "owner": user_json(ws),
        "workspace": {"uuid": format!("{{{}}}", ws), "slug": ws, "name": ws},
        "created_on": "2026-01-12T09:00:00+00:00",
        "updated_on": "2026-01-12T09:00:00+00:00",
        "links": {
            "self": {"href": format!("{}/repositories/{}/{}", BASE_URL, ws, slug)},
            "html": {"href": format!("https://bitbucket.fixture/{}/{}", ws, slug)},
        },
    })
}

fn merge_repository_fields(json: &mut Value, body: Option<&Value>) {
    let Some(body) = body.and_then(Value::as_object) else {
        return;
    };
    for field in ["name", "scm", "description", "is_private", "language", "website", "fork_policy"] {
        if let Some(value) = body.get(field) {
            json[field] = value.clone();
        }
    }
}

fn empty_repo(json: Value) -> FixtureRepo {
    FixtureRepo {
        json,
        commits: Vec::new(),
        branches: BTreeMap::new(),
        watchers: Vec::new(),
        forks: Vec::new(),
        pull_requests: BTreeMap::new(),
    }
}

fn pull_request_json(
    id: u64,
    title: &str,
    state: &str,
    author: &str,
    source: &str,
    destination: &str,
) -> Value {
    json!({
        "type": "pullrequest",
        "id": id,
        "title": title,
        "description": "",
        "state": state,
        "author": user_json(author),
        "source": {"branch": {"name": source}, "commit": {"hash": "e1ee0e5ffa52"}},
        "destination": {"branch": {"name": destination}, "commit": {"hash": "f4d5b2aef7f7"}},
        "reviewers": [],
        "participants": [],
        "comment_count": 2,
        "task_count": 0,
        "close_source_branch": false,
        "created_on": "2014-02-08T04:29:19+00:00",
        "updated_on": "2014-02-10T21:09:31+00:00",
    })
}

fn mercurial_repo() -> FixtureRepo {
    let mut json = repository_json(MIRROR_WORKSPACE, MERCURIAL_REPO, "{b3c4b2c8-5b4a-4b6e-9d3c-1c7f3f2a9e10}");
    json["scm"] = json!("hg");
    json["website"] = json!("https://www.mercurial-scm.org/");
    json["language"] = json!("python");
    json["description"] = json!("Mercurial mirror");

    // Linear history, newest first; the known hash sits in the middle.
    let hashes: Vec<String> = (0..MERCURIAL_COMMITS)
        .map(|i| {
            if i == MERCURIAL_COMMITS / 2 {
                KNOWN_HASH.to_string()
            } else {
                format!("{:040x}", 0xfeed_0000_u64 + i as u64)
            }
        })
        .collect();
    let commits = hashes
        .iter()
        .enumerate()
        .map(|(i, hash)| FixtureCommit {
            hash: hash.clone(),
            message: format!("mercurial change {}", MERCURIAL_COMMITS - i),
            date: "2014-01-01T00:00:00+00:00".to_string(),
            parents: hashes.get(i + 1).cloned().into_iter().collect(),
            paths: vec!["mercurial/".to_string()],
        })
        .collect();

    let watchers = (0..MERCURIAL_WATCHERS)
        .map(|i| user_json(&format!("watcher{}", i)))
        .collect();
    let forks = (0..MERCURIAL_FORKS)
        .map(|i| {
            let owner = format!("forker{}", i);
            let mut fork = repository_json(&owner, MERCURIAL_REPO, &format!("{{fork-{}}}", i));
            fork["parent"] = json!({
                "uuid": json["uuid"],
                "name": MERCURIAL_REPO,
                "full_name": format!("{}/{}", MIRROR_WORKSPACE, MERCURIAL_REPO),
            });
            fork
        })
        .collect();

    let mut pull_requests = BTreeMap::new();
    pull_requests.insert(
        DECLINED_PR,
        FixturePullRequest {
            json: pull_request_json(
                DECLINED_PR,
                "Selective read/write or read-only repos with hg-ssh",
                "DECLINED",
                "goodtune",
                "default",
                "default",
            ),
            activity: vec![
                json!({"update": {"state": "DECLINED", "title": "Selective read/write or read-only repos with hg-ssh", "author": user_json("mirror-admin"), "date": "2014-02-10T21:09:31+00:00"}}),
                json!({"comment": {"id": 53790, "content": {"raw": "Fair enough, I'll send it to the list."}, "user": user_json("goodtune"), "created_on": "2014-02-09T01:00:00+00:00"}}),
                json!({"comment": {"id": MIRROR_COMMENT_ID, "content": {"raw": MIRROR_COMMENT}, "user": user_json("mirror-admin"), "created_on": "2014-02-08T12:00:00+00:00"}}),
                json!({"update": {"state": "OPEN", "title": "Selective read/write or read-only repos with hg-ssh", "author": user_json("goodtune"), "date": "2014-02-08T04:29:19+00:00"}}),
            ],
            comments: vec![
                json!({"id": MIRROR_COMMENT_ID, "content": {"raw": MIRROR_COMMENT, "markup": "markdown"}, "user": user_json("mirror-admin"), "created_on": "2014-02-08T12:00:00+00:00"}),
                json!({"id": 53790, "content": {"raw": "Fair enough, I'll send it to the list.", "markup": "markdown"}, "user": user_json("goodtune"), "created_on": "2014-02-09T01:00:00+00:00", "parent": {"id": MIRROR_COMMENT_ID}}),
            ],
            commits: vec![
                json!({"hash": "e1ee0e5ffa52", "message": "Update the docstring", "parents": [{"hash": "d0d2e1a2b3c4"}]}),
                json!({"hash": "d0d2e1a2b3c4", "message": "hg-ssh: add --read-only option", "parents": [{"hash": "f4d5b2aef7f7"}]}),
            ],
            diff: PR_DIFF.to_string(),
        },
    );
    pull_requests.insert(
        OPEN_PR,
        FixturePullRequest {
            json: pull_request_json(OPEN_PR, "Fix typo in README", "OPEN", "jdoe", "typo", "default"),
            activity: Vec::new(),
            comments: Vec::new(),
            commits: Vec::new(),
            diff: String::new(),
        },
    );

    let mut branches = BTreeMap::new();
    branches.insert("default".to_string(), hashes[0].clone());

    FixtureRepo {
        json,
        commits,
        branches,
        watchers,
        forks,
        pull_requests,
    }
}

fn test_repo() -> FixtureRepo {
    let json = repository_json(CURRENT_USER, TEST_REPO, "{7e0f2a1c-0000-4000-8000-000000000001}");
    let commit = |hash: &str, message: &str, parents: &[&str], paths: &[&str]| FixtureCommit {
        hash: hash.to_string(),
        message: message.to_string(),
        date: "2026-01-12T09:00:00+00:00".to_string(),
        parents: parents.iter().map(|p| p.to_string()).collect(),
        paths: paths.iter().map(|p| p.to_string()).collect(),
    };

    let c1 = FIRST_COMMIT;
    let c2 = "c2000000000000000000000000000000000000c2";
    let c3 = "c3000000000000000000000000000000000000c3";
    let c4 = "c4000000000000000000000000000000000000c4";
    let c5 = "c5000000000000000000000000000000000000c5";

    let commits = vec![
        commit(c5, "Bad change to be declined", &[c2], &["docs/bad.txt"]),
        commit(c4, "Second change to accept", &[c3], &["src/lib.rs"]),
        commit(c3, "First change to accept", &[c2], &["src/main.rs"]),
        commit(c2, "Add greeting", &[c1], &["src/main.rs"]),
        commit(c1, "Initial commit", &[], &["src/main.rs", "README.md"]),
    ];

    let mut branches = BTreeMap::new();
    branches.insert("master".to_string(), c2.to_string());
    branches.insert("branchToAccept".to_string(), c4.to_string());
    branches.insert("branchToDecline".to_string(), c5.to_string());

    FixtureRepo {
        json,
        commits,
        branches,
        watchers: vec![user_json(CURRENT_USER)],
        forks: Vec::new(),
        pull_requests: BTreeMap::new(),
    }
}
