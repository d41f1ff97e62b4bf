use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenCodec;
use auth::UserDirectory;
use social_service::domain::post::errors::PostError;
use social_service::domain::post::models::Comment;
use social_service::domain::post::models::CommentId;
use social_service::domain::post::models::Like;
use social_service::domain::post::models::LikeId;
use social_service::domain::post::models::NewComment;
use social_service::domain::post::models::NewLike;
use social_service::domain::post::models::NewPost;
use social_service::domain::post::models::Post;
use social_service::domain::post::models::PostId;
use social_service::domain::post::models::PostSorting;
use social_service::domain::post::models::PostWithLikes;
use social_service::domain::post::ports::PostRepository;
use social_service::domain::post::service::PostService;
use social_service::domain::user::errors::MailerError;
use social_service::domain::user::errors::UserError;
use social_service::domain::user::models::EmailAddress;
use social_service::domain::user::models::NewUser;
use social_service::domain::user::models::User;
use social_service::domain::user::models::UserId;
use social_service::domain::user::ports::ConfirmationMailer;
use social_service::domain::user::ports::UserRepository;
use social_service::domain::user::service::UserService;
use social_service::inbound::http::router::create_router;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_codec: Arc<TokenCodec>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_codec = Arc::new(TokenCodec::new(JWT_SECRET));
        let mailer = Arc::new(RecordingMailer::default());

        let user_service = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::clone(&mailer),
            Arc::clone(&token_codec),
            address.clone(),
        ));
        let post_service = Arc::new(PostService::new(Arc::new(InMemoryPostRepository::default())));

        let router = create_router(user_service, post_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_codec,
            mailer,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/register")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/token")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Path of the last confirmation link sent to `email`.
    pub fn confirmation_path(&self, email: &str) -> String {
        let url = self
            .mailer
            .last_url_for(email)
            .expect("No confirmation email was sent");
        url.strip_prefix(&self.address)
            .expect("Confirmation link points elsewhere")
            .to_string()
    }

    /// Register, confirm and log in; returns an access token.
    pub async fn confirmed_user_token(&self, email: &str, password: &str) -> String {
        self.register(email, password).await;
        self.get(&self.confirmation_path(email))
            .send()
            .await
            .expect("Failed to execute request");

        let body: serde_json::Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("No access token in response")
            .to_string()
    }

    pub async fn create_post(&self, token: &str, body: &str) -> serde_json::Value {
        self.post_authenticated("/post", token)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response")
    }
}

/// Mailer double that records every confirmation link it is given
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn last_url_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, url)| url.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ConfirmationMailer for RecordingMailer {
    async fn send_confirmation(
        &self,
        email: &EmailAddress,
        confirmation_url: &str,
    ) -> Result<(), MailerError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.as_str().to_string(), confirmation_url.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserDirectory for InMemoryUserRepository {
    type User = User;
    type Error = UserError;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let created = User {
            id: UserId(users.len() as i64 + 1),
            email: user.email,
            password_hash: user.password_hash,
            confirmed: false,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn set_confirmed(&self, email: &EmailAddress) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|user| user.email == *email)
            .ok_or_else(|| UserError::NotFound(email.to_string()))?;
        user.confirmed = true;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    comments: Mutex<Vec<Comment>>,
    likes: Mutex<Vec<Like>>,
}

impl InMemoryPostRepository {
    fn with_likes(&self, post: Post) -> PostWithLikes {
        let likes = self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|like| like.post_id == post.id)
            .count() as i64;
        PostWithLikes { post, likes }
    }

    fn post_exists(&self, id: PostId) -> bool {
        self.posts.lock().unwrap().iter().any(|post| post.id == id)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, post: NewPost) -> Result<Post, PostError> {
        let mut posts = self.posts.lock().unwrap();
        let created = Post {
            id: PostId(posts.len() as i64 + 1),
            body: post.body,
            user_id: post.user_id,
        };
        posts.push(created.clone());
        Ok(created)
    }

    async fn find_post(&self, id: PostId) -> Result<Option<PostWithLikes>, PostError> {
        let post = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|post| post.id == id)
            .cloned();
        Ok(post.map(|post| self.with_likes(post)))
    }

    async fn list_posts(&self, sorting: PostSorting) -> Result<Vec<PostWithLikes>, PostError> {
        let posts = self.posts.lock().unwrap().clone();
        let mut listed: Vec<PostWithLikes> =
            posts.into_iter().map(|post| self.with_likes(post)).collect();

        match sorting {
            PostSorting::New => listed.sort_by(|a, b| b.post.id.0.cmp(&a.post.id.0)),
            PostSorting::Old => listed.sort_by(|a, b| a.post.id.0.cmp(&b.post.id.0)),
            PostSorting::MostLikes => listed.sort_by(|a, b| {
                b.likes
                    .cmp(&a.likes)
                    .then_with(|| b.post.id.0.cmp(&a.post.id.0))
            }),
        }
        Ok(listed)
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, PostError> {
        if !self.post_exists(comment.post_id) {
            return Err(PostError::PostNotFound(comment.post_id));
        }

        let mut comments = self.comments.lock().unwrap();
        let created = Comment {
            id: CommentId(comments.len() as i64 + 1),
            body: comment.body,
            post_id: comment.post_id,
            user_id: comment.user_id,
        };
        comments.push(created.clone());
        Ok(created)
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>, PostError> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create_like(&self, like: NewLike) -> Result<Like, PostError> {
        if !self.post_exists(like.post_id) {
            return Err(PostError::PostNotFound(like.post_id));
        }

        let mut likes = self.likes.lock().unwrap();
        if likes
            .iter()
            .any(|existing| existing.post_id == like.post_id && existing.user_id == like.user_id)
        {
            return Err(PostError::AlreadyLiked(like.post_id));
        }

        let created = Like {
            id: LikeId(likes.len() as i64 + 1),
            post_id: like.post_id,
            user_id: like.user_id,
        };
        likes.push(created.clone());
        Ok(created)
    }
}
